//! The boundary between the constraint builder and the satisfiability backend.
//!
//! A [`Problem`] declares finite enumerated sorts, boolean and enumerated variables, and a list
//! of asserted [`Formula`]s. Formulas combine boolean connectives, equality between enumerated
//! terms and exact pseudo-boolean counting ([`Count`]). Rational weights are expressed over a
//! common denominator by the caller. Algebraic datatypes are encoded as records of these
//! primitives (see [`crate::domain::LessonTerm`]).
//!
//! Any [`Backend`] can decide a problem; on success it yields a [`Model`] which evaluates every
//! variable and formula of that problem.

mod backend;
mod formula;
mod model;
mod problem;

pub use backend::Backend;
pub use backend::Outcome;
pub use backend::Verdict;
pub use formula::BoolVar;
pub use formula::Count;
pub use formula::EnumTerm;
pub use formula::EnumVar;
pub use formula::Formula;
pub use formula::SortId;
pub use model::Model;
pub use problem::Problem;
pub use problem::SortDecl;
