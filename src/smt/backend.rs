use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

use super::Model;
use super::Problem;

/// A satisfiability capability which decides a [`Problem`].
pub trait Backend {
    /// Decide whether every assertion of `problem` can be satisfied at once.
    fn check(&mut self, problem: &Problem) -> Verdict;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn check(&mut self, problem: &Problem) -> Verdict {
        (**self).check(problem)
    }
}

/// The answer of a [`Backend`].
#[derive(Clone, Debug)]
pub enum Verdict {
    Satisfiable(Model),
    Unsatisfiable,
    /// The backend gave up; the reason is informational only.
    Unknown(String),
}

impl Verdict {
    pub fn outcome(&self) -> Outcome {
        match self {
            Verdict::Satisfiable(_) => Outcome::Satisfiable,
            Verdict::Unsatisfiable => Outcome::Unsatisfiable,
            Verdict::Unknown(_) => Outcome::Unknown,
        }
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Verdict::Satisfiable(model) => Some(model),
            Verdict::Unsatisfiable | Verdict::Unknown(_) => None,
        }
    }
}

/// The ternary satisfiability verdict.
///
/// [`Outcome::Unknown`] means the search did not finish and must never be read as "no schedule
/// exists".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Satisfiable => write!(f, "SATISFIABLE"),
            Outcome::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Outcome::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
