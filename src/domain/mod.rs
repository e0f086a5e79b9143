//! The domain model: identifiers, the calendar, lessons and slot items, both as concrete values
//! and as their symbolic counterparts over a [`crate::smt::Problem`].

mod calendar;
mod ids;
mod lesson;
mod sorts;
mod terms;

pub use calendar::Day;
pub use calendar::Slot;
pub use calendar::DAYS_PER_WEEK;
pub use calendar::SLOTS_PER_DAY;
pub use ids::GroupId;
pub use ids::RoomId;
pub use ids::SubjectId;
pub use ids::TutorId;
pub use lesson::Lesson;
pub use lesson::LessonKind;
pub use lesson::Parity;
pub use lesson::SlotItem;
pub use sorts::ConstantTable;
pub use sorts::ScheduleSorts;
pub use terms::LessonTerm;
pub use terms::ScheduleFunction;
pub use terms::SlotItemTerm;
