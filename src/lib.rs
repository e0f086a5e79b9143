//! # Timetabler
//! Synthesises weekly class timetables for university study groups.
//!
//! A valid timetable is described declaratively: the [`constraints`] module turns the
//! [`domain`] model into a single formula over finite sorts and pseudo-boolean sums, the
//! [`generator`] hands that formula to a satisfiability [`smt::Backend`] and the [`decoder`]
//! turns a satisfying valuation back into a concrete [`decoder::Schedule`].
//!
//! The default backend lowers the formula to CNF (see [`encodings`]) and delegates the search
//! to the `splr` CDCL solver.
//!
//! ```no_run
//! use timetabler::domain::LessonKind;
//! use timetabler::domain::RoomId;
//! use timetabler::domain::SubjectId;
//! use timetabler::domain::TutorId;
//! use timetabler::domain::GroupId;
//! use timetabler::generator::Curriculum;
//! use timetabler::generator::Eligibility;
//! use timetabler::generator::Outcome;
//! use timetabler::generator::RequiredLoad;
//! use timetabler::generator::ScheduleGenerator;
//! use timetabler::basic_types::Load;
//!
//! let mut load = RequiredLoad::default();
//! load.set(SubjectId(1), LessonKind::Lecture, Load::whole(2));
//!
//! let curriculum = Curriculum::new(
//!     load,
//!     [Eligibility::new(Some(TutorId(1)), SubjectId(1), LessonKind::Lecture)],
//!     [RoomId(1)],
//!     [GroupId(1)],
//! )
//! .unwrap();
//!
//! let mut generator = ScheduleGenerator::new(curriculum);
//! if generator.check().unwrap() == Outcome::Satisfiable {
//!     let schedule = generator.decode().unwrap();
//!     println!("{schedule:?}");
//! }
//! ```

pub mod asserts;
pub mod basic_types;
pub mod constraints;
pub mod decoder;
pub mod domain;
pub mod encodings;
pub mod generator;
pub mod render;
pub mod runner;
pub mod sat;
pub mod smt;

mod tests;

pub use basic_types::ConfigurationError;
pub use basic_types::DecodeError;
pub use basic_types::SortMismatchError;
pub use generator::Outcome;
pub use generator::ScheduleGenerator;
