use std::time::Instant;

use log::debug;
use log::warn;
use splr::Certificate;

use super::LoweredProblem;
use crate::encodings::LinearEncoding;
use crate::smt::Backend;
use crate::smt::Problem;
use crate::smt::Verdict;

/// Decides problems by lowering them to CNF and running `splr` on the clauses.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplrBackend {
    encoding: LinearEncoding,
}

impl SplrBackend {
    pub fn new(encoding: LinearEncoding) -> SplrBackend {
        SplrBackend { encoding }
    }

    pub fn encoding(&self) -> LinearEncoding {
        self.encoding
    }
}

impl Backend for SplrBackend {
    fn check(&mut self, problem: &Problem) -> Verdict {
        let lowered = LoweredProblem::new(problem, self.encoding);

        if lowered.cnf().is_inconsistent() {
            debug!("the CNF contains an empty clause");
            return Verdict::Unsatisfiable;
        }

        let start = Instant::now();
        let certificate = Certificate::try_from(lowered.cnf().to_dimacs_clauses());
        debug!("splr finished after {:?}", start.elapsed());

        match certificate {
            Ok(Certificate::SAT(assignment)) => Verdict::Satisfiable(lowered.model(&assignment)),
            Ok(Certificate::UNSAT) => Verdict::Unsatisfiable,
            Err(error) => {
                warn!("splr gave up: {error:?}");
                Verdict::Unknown(format!("{error:?}"))
            }
        }
    }
}
