use std::fmt::Display;
use std::fmt::Formatter;

use enumset::EnumSetType;
use serde::Deserialize;
use serde::Serialize;

use super::RoomId;
use super::SubjectId;
use super::TutorId;

#[derive(Debug, Hash, PartialOrd, Ord, EnumSetType, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    Lecture,
    Seminar,
    Lab,
}

impl LessonKind {
    pub const ALL: [LessonKind; 3] = [LessonKind::Lecture, LessonKind::Seminar, LessonKind::Lab];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<LessonKind> {
        LessonKind::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            LessonKind::Lecture => "lecture",
            LessonKind::Seminar => "seminar",
            LessonKind::Lab => "lab",
        }
    }
}

impl Display for LessonKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a lesson takes place every week or only on odd (numerator) or even (denominator)
/// weeks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Whole,
    Numerator,
    Denominator,
}

/// The content of one lesson position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lesson {
    Blank,
    Filled {
        subject: SubjectId,
        kind: LessonKind,
        /// `None` when the lesson has no tutor assigned.
        tutor: Option<TutorId>,
        room: RoomId,
    },
}

impl Lesson {
    pub fn is_blank(&self) -> bool {
        matches!(self, Lesson::Blank)
    }

    pub fn is_filled(&self) -> bool {
        !self.is_blank()
    }

    pub fn is_lecture(&self) -> bool {
        matches!(
            self,
            Lesson::Filled {
                kind: LessonKind::Lecture,
                ..
            }
        )
    }
}

/// The content of one (group, day, slot) cell: a lesson held every week, or a pair of lessons
/// alternating between numerator and denominator weeks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotItem {
    Single(Lesson),
    Pair {
        numerator: Lesson,
        denominator: Lesson,
    },
}

impl SlotItem {
    pub const BLANK: SlotItem = SlotItem::Single(Lesson::Blank);

    pub fn is_single(&self) -> bool {
        matches!(self, SlotItem::Single(_))
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, SlotItem::Pair { .. })
    }

    /// Whether nothing is scheduled in this cell, regardless of its shape.
    pub fn is_blank(&self) -> bool {
        self.lessons().all(|(_, lesson)| lesson.is_blank())
    }

    /// The lesson positions of this item together with the weeks they apply to.
    pub fn lessons(&self) -> impl Iterator<Item = (Parity, Lesson)> {
        let lessons = match *self {
            SlotItem::Single(lesson) => [Some((Parity::Whole, lesson)), None],
            SlotItem::Pair {
                numerator,
                denominator,
            } => [
                Some((Parity::Numerator, numerator)),
                Some((Parity::Denominator, denominator)),
            ],
        };

        lessons.into_iter().flatten()
    }
}
