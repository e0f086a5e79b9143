//! The default [`Backend`](crate::smt::Backend): the symbolic problem is lowered to CNF and
//! handed to the `splr` CDCL solver.
mod cnf;
mod lowering;
mod solver;

pub use cnf::Cnf;
pub use cnf::Literal;
pub use lowering::LoweredProblem;
pub use solver::SplrBackend;
