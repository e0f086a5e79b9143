use std::collections::BTreeMap;

use super::GroupId;
use super::LessonKind;
use super::RoomId;
use super::SubjectId;
use super::TutorId;
use crate::smt::EnumTerm;
use crate::smt::Problem;
use crate::smt::SortId;

/// Maps the identifiers of one domain onto dense indices, in order of first appearance.
///
/// Interning the same identifier twice yields the same index.
#[derive(Clone, Debug)]
pub struct ConstantTable<Id> {
    index: BTreeMap<Id, usize>,
    ids: Vec<Id>,
}

impl<Id> Default for ConstantTable<Id> {
    fn default() -> Self {
        ConstantTable {
            index: BTreeMap::new(),
            ids: Vec::new(),
        }
    }
}

impl<Id: Copy + Ord> ConstantTable<Id> {
    pub fn from_ids(ids: impl IntoIterator<Item = Id>) -> Self {
        let mut table = ConstantTable::default();
        for id in ids {
            let _ = table.intern(id);
        }
        table
    }

    pub fn intern(&mut self, id: Id) -> usize {
        if let Some(&index) = self.index.get(&id) {
            return index;
        }

        let index = self.ids.len();
        self.ids.push(id);
        let _ = self.index.insert(id, index);
        index
    }

    pub fn index_of(&self, id: Id) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn id(&self, index: usize) -> Option<Id> {
        self.ids.get(index).copied()
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The finite sorts of the timetable and the constants of the configured domains.
///
/// The subject and room sorts are open: besides one value per configured identifier they hold
/// one `unknown` value, so that the fields of a blank lesson are always representable. The tutor
/// sort holds one explicit `absent` value for lessons without a tutor.
#[derive(Clone, Debug)]
pub struct ScheduleSorts {
    subject: SortId,
    room: SortId,
    tutor: SortId,
    kind: SortId,
    subjects: ConstantTable<SubjectId>,
    rooms: ConstantTable<RoomId>,
    tutors: ConstantTable<TutorId>,
    groups: ConstantTable<GroupId>,
}

impl ScheduleSorts {
    pub fn declare(
        problem: &mut Problem,
        subjects: ConstantTable<SubjectId>,
        rooms: ConstantTable<RoomId>,
        tutors: ConstantTable<TutorId>,
        groups: ConstantTable<GroupId>,
    ) -> ScheduleSorts {
        let subject = problem.declare_sort("Subject", values_with(subjects.ids(), "unknown"));
        let room = problem.declare_sort("Room", values_with(rooms.ids(), "unknown"));
        let tutor = problem.declare_sort("Tutor", values_with(tutors.ids(), "absent"));
        let kind = problem.declare_sort(
            "Kind",
            LessonKind::ALL
                .iter()
                .map(|kind| kind.name().to_owned())
                .collect(),
        );

        ScheduleSorts {
            subject,
            room,
            tutor,
            kind,
            subjects,
            rooms,
            tutors,
            groups,
        }
    }

    pub fn subject_sort(&self) -> SortId {
        self.subject
    }

    pub fn room_sort(&self) -> SortId {
        self.room
    }

    pub fn tutor_sort(&self) -> SortId {
        self.tutor
    }

    pub fn kind_sort(&self) -> SortId {
        self.kind
    }

    pub fn subjects(&self) -> &ConstantTable<SubjectId> {
        &self.subjects
    }

    pub fn rooms(&self) -> &ConstantTable<RoomId> {
        &self.rooms
    }

    pub fn tutors(&self) -> &ConstantTable<TutorId> {
        &self.tutors
    }

    pub fn groups(&self) -> &ConstantTable<GroupId> {
        &self.groups
    }

    pub fn subject(&self, id: SubjectId) -> Option<EnumTerm> {
        self.subjects.index_of(id).map(|value| EnumTerm::Const {
            sort: self.subject,
            value,
        })
    }

    /// The constants of every configured subject; excludes the `unknown` value.
    pub fn subject_constants(&self) -> impl Iterator<Item = EnumTerm> + '_ {
        (0..self.subjects.len()).map(|value| EnumTerm::Const {
            sort: self.subject,
            value,
        })
    }

    pub fn room(&self, id: RoomId) -> Option<EnumTerm> {
        self.rooms.index_of(id).map(|value| EnumTerm::Const {
            sort: self.room,
            value,
        })
    }

    /// The constants of every configured room; excludes the `unknown` value.
    pub fn room_constants(&self) -> impl Iterator<Item = EnumTerm> + '_ {
        (0..self.rooms.len()).map(|value| EnumTerm::Const {
            sort: self.room,
            value,
        })
    }

    /// The constant for `tutor`, where `None` is the absent tutor.
    pub fn tutor(&self, tutor: Option<TutorId>) -> Option<EnumTerm> {
        let value = match tutor {
            Some(id) => self.tutors.index_of(id)?,
            None => self.tutors.len(),
        };

        Some(EnumTerm::Const {
            sort: self.tutor,
            value,
        })
    }

    pub fn absent_tutor(&self) -> EnumTerm {
        EnumTerm::Const {
            sort: self.tutor,
            value: self.tutors.len(),
        }
    }

    pub fn kind(&self, kind: LessonKind) -> EnumTerm {
        EnumTerm::Const {
            sort: self.kind,
            value: kind.index(),
        }
    }

    /// The subject denoted by a value index of the subject sort, `None` for `unknown`.
    pub fn subject_of(&self, value: usize) -> Option<SubjectId> {
        self.subjects.id(value)
    }

    /// The room denoted by a value index of the room sort, `None` for `unknown`.
    pub fn room_of(&self, value: usize) -> Option<RoomId> {
        self.rooms.id(value)
    }

    /// The tutor denoted by a value index of the tutor sort; `Some(None)` is the absent tutor.
    pub fn tutor_of(&self, value: usize) -> Option<Option<TutorId>> {
        if value == self.tutors.len() {
            Some(None)
        } else {
            self.tutors.id(value).map(Some)
        }
    }

    pub fn kind_of(&self, value: usize) -> Option<LessonKind> {
        LessonKind::from_index(value)
    }
}

fn values_with<Id: ToString>(ids: &[Id], extra: &str) -> Vec<String> {
    ids.iter()
        .map(ToString::to_string)
        .chain(std::iter::once(extra.to_owned()))
        .collect()
}
