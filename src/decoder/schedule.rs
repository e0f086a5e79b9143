use serde::Serialize;

use crate::basic_types::Load;
use crate::domain::Day;
use crate::domain::GroupId;
use crate::domain::Lesson;
use crate::domain::LessonKind;
use crate::domain::Parity;
use crate::domain::RoomId;
use crate::domain::Slot;
use crate::domain::SlotItem;
use crate::domain::SubjectId;
use crate::domain::TutorId;

/// The decoded timetables of all groups, in the order the groups were configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub groups: Vec<GroupSchedule>,
}

impl Schedule {
    pub fn group(&self, group: GroupId) -> Option<&GroupSchedule> {
        self.groups.iter().find(|schedule| schedule.group == group)
    }
}

/// The timetable of one group, Monday to Saturday.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupSchedule {
    pub group: GroupId,
    pub days: Vec<DaySchedule>,
}

impl GroupSchedule {
    /// The number of lessons of `subject` and `kind` per week, counting each side of a pair as
    /// half a lesson.
    pub fn weekly_load(&self, subject: SubjectId, kind: LessonKind) -> Load {
        self.assignments()
            .filter(|assignment| assignment.subject == subject && assignment.kind == kind)
            .map(|assignment| match assignment.parity {
                Parity::Whole => Load::whole(1),
                Parity::Numerator | Parity::Denominator => Load::from_halves(1),
            })
            .sum()
    }

    /// Every scheduled lesson of the week.
    pub fn assignments(&self) -> impl Iterator<Item = &LessonAssignment> + '_ {
        self.days.iter().flat_map(|day| {
            day.slots
                .iter()
                .flatten()
                .flat_map(|item| item.assignments())
        })
    }
}

/// The slots of one day; `None` marks a slot where nothing is scheduled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day: Day,
    pub slots: Vec<Option<LessonItem>>,
}

impl DaySchedule {
    /// The cell content at `slot`, with an empty slot as `Single(Blank)`.
    pub fn slot_item(&self, slot: Slot) -> SlotItem {
        self.slots
            .get(slot.index())
            .and_then(Option::as_ref)
            .map_or(SlotItem::BLANK, LessonItem::to_slot_item)
    }

    /// The indices of the slots where something is scheduled.
    pub fn occupied_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, item)| item.as_ref().is_some_and(|item| !item.is_blank()))
            .map(|(index, _)| index)
    }
}

/// What happens in an occupied slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LessonItem {
    Single(LessonAssignment),
    /// Alternating lessons; a side without a lesson is `None`.
    Pair {
        numerator: Option<LessonAssignment>,
        denominator: Option<LessonAssignment>,
    },
}

impl LessonItem {
    /// `None` for `Single(Blank)`, the only item without anything to show.
    pub fn from_slot_item(item: SlotItem) -> Option<LessonItem> {
        match item {
            SlotItem::Single(lesson) => {
                LessonAssignment::from_lesson(lesson, Parity::Whole).map(LessonItem::Single)
            }
            SlotItem::Pair {
                numerator,
                denominator,
            } => Some(LessonItem::Pair {
                numerator: LessonAssignment::from_lesson(numerator, Parity::Numerator),
                denominator: LessonAssignment::from_lesson(denominator, Parity::Denominator),
            }),
        }
    }

    pub fn to_slot_item(&self) -> SlotItem {
        let lesson = |assignment: &Option<LessonAssignment>| {
            assignment
                .as_ref()
                .map_or(Lesson::Blank, LessonAssignment::to_lesson)
        };

        match self {
            LessonItem::Single(assignment) => SlotItem::Single(assignment.to_lesson()),
            LessonItem::Pair {
                numerator,
                denominator,
            } => SlotItem::Pair {
                numerator: lesson(numerator),
                denominator: lesson(denominator),
            },
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(
            self,
            LessonItem::Pair {
                numerator: None,
                denominator: None
            }
        )
    }

    pub fn assignments(&self) -> impl Iterator<Item = &LessonAssignment> + '_ {
        let assignments = match self {
            LessonItem::Single(assignment) => [Some(assignment), None],
            LessonItem::Pair {
                numerator,
                denominator,
            } => [numerator.as_ref(), denominator.as_ref()],
        };

        assignments.into_iter().flatten()
    }
}

/// One concrete lesson of a timetable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LessonAssignment {
    pub kind: LessonKind,
    pub subject: SubjectId,
    pub tutor: Option<TutorId>,
    pub room: RoomId,
    pub parity: Parity,
}

impl LessonAssignment {
    pub fn from_lesson(lesson: Lesson, parity: Parity) -> Option<LessonAssignment> {
        match lesson {
            Lesson::Blank => None,
            Lesson::Filled {
                subject,
                kind,
                tutor,
                room,
            } => Some(LessonAssignment {
                kind,
                subject,
                tutor,
                room,
                parity,
            }),
        }
    }

    pub fn to_lesson(&self) -> Lesson {
        Lesson::Filled {
            subject: self.subject,
            kind: self.kind,
            tutor: self.tutor,
            room: self.room,
        }
    }

    pub fn is_lecture(&self) -> bool {
        self.kind == LessonKind::Lecture
    }
}
