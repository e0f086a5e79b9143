//! Unary encodings of a sum of literals, used to lower pseudo-boolean counts to CNF.
mod sequential_sum;
mod totalizer;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

pub use sequential_sum::SequentialSum;
pub use totalizer::Totalizer;

use crate::sat::Cnf;
use crate::sat::Literal;

/// The encoding used for the linear sums of the schedule constraints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinearEncoding {
    #[default]
    Totalizer,
    SequentialSums,
}

pub(crate) fn create_encoder(encoding: LinearEncoding) -> Box<dyn UnitSumEncoder> {
    match encoding {
        LinearEncoding::Totalizer => Box::new(Totalizer),
        LinearEncoding::SequentialSums => Box::new(SequentialSum),
    }
}

/// A common trait for all unit sum encoders.
pub trait UnitSumEncoder {
    /// Encode the sum `\sum x_i` of `inputs` in unary and return its first `cap` digits: the
    /// literal at index `t` is equivalent to `\sum x_i >= t + 1`.
    ///
    /// `cap` may not exceed the number of inputs.
    fn encode(&self, cnf: &mut Cnf, inputs: &[Literal], cap: usize) -> Vec<Literal>;
}
