//! Reads concrete timetables back from a satisfying valuation.
//!
//! Decoding is a pure read of the [`Model`]: it can run for one group or one cell at a time and
//! never changes the state of the generator.
mod schedule;

pub use schedule::DaySchedule;
pub use schedule::GroupSchedule;
pub use schedule::LessonAssignment;
pub use schedule::LessonItem;
pub use schedule::Schedule;

use crate::basic_types::DecodeError;
use crate::domain::Day;
use crate::domain::GroupId;
use crate::domain::Lesson;
use crate::domain::LessonTerm;
use crate::domain::ScheduleFunction;
use crate::domain::ScheduleSorts;
use crate::domain::Slot;
use crate::domain::SlotItem;
use crate::domain::DAYS_PER_WEEK;
use crate::smt::EnumTerm;
use crate::smt::Model;

/// A satisfying valuation viewed as a timetable.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleModel<'a> {
    model: &'a Model,
    sorts: &'a ScheduleSorts,
    schedule: &'a ScheduleFunction,
}

impl<'a> ScheduleModel<'a> {
    pub fn new(
        model: &'a Model,
        sorts: &'a ScheduleSorts,
        schedule: &'a ScheduleFunction,
    ) -> ScheduleModel<'a> {
        ScheduleModel {
            model,
            sorts,
            schedule,
        }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// The content of the cell of `group` at (`day`, `slot`).
    pub fn slot_item(&self, group: GroupId, day: Day, slot: Slot) -> Result<SlotItem, DecodeError> {
        let index = self
            .sorts
            .groups()
            .index_of(group)
            .ok_or(DecodeError::UnknownGroup(group))?;

        self.cell(index, day, slot)
    }

    /// The content of a cell addressed by the indices of the group, the day and the slot.
    pub fn slot_item_at(
        &self,
        group: usize,
        day: usize,
        slot: usize,
    ) -> Result<SlotItem, DecodeError> {
        let groups = self.schedule.num_groups();
        if group >= groups {
            return Err(DecodeError::GroupOutOfRange {
                index: group,
                groups,
            });
        }
        let day = Day::from_index(day).ok_or(DecodeError::DayOutOfRange(day))?;
        let slot = Slot::new(slot).ok_or(DecodeError::SlotOutOfRange(slot))?;

        self.cell(group, day, slot)
    }

    pub fn decode_group(&self, group: GroupId) -> Result<GroupSchedule, DecodeError> {
        let index = self
            .sorts
            .groups()
            .index_of(group)
            .ok_or(DecodeError::UnknownGroup(group))?;

        let mut days = Vec::with_capacity(DAYS_PER_WEEK);
        for day in Day::ALL {
            let slots = Slot::all()
                .map(|slot| Ok(LessonItem::from_slot_item(self.cell(index, day, slot)?)))
                .collect::<Result<Vec<_>, DecodeError>>()?;
            days.push(DaySchedule { day, slots });
        }

        Ok(GroupSchedule { group, days })
    }

    /// Decode the timetables of all groups.
    pub fn decode(&self) -> Result<Schedule, DecodeError> {
        let groups = self
            .sorts
            .groups()
            .ids()
            .iter()
            .map(|&group| self.decode_group(group))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Schedule { groups })
    }

    fn cell(&self, group: usize, day: Day, slot: Slot) -> Result<SlotItem, DecodeError> {
        let item = self
            .schedule
            .get(group, day, slot)
            .ok_or(DecodeError::GroupOutOfRange {
                index: group,
                groups: self.schedule.num_groups(),
            })?;

        if self.model.bool_value(item.pair()) {
            Ok(SlotItem::Pair {
                numerator: self.lesson(item.numerator())?,
                denominator: self.lesson(item.denominator())?,
            })
        } else {
            Ok(SlotItem::Single(self.lesson(item.single())?))
        }
    }

    fn lesson(&self, lesson: &LessonTerm) -> Result<Lesson, DecodeError> {
        if !self.model.bool_value(lesson.filled()) {
            return Ok(Lesson::Blank);
        }

        let subject = self.value(lesson.subject(), |value| self.sorts.subject_of(value))?;
        let kind = self.value(lesson.kind(), |value| self.sorts.kind_of(value))?;
        let tutor = self.value(lesson.tutor(), |value| self.sorts.tutor_of(value))?;
        let room = self.value(lesson.room(), |value| self.sorts.room_of(value))?;

        Ok(Lesson::Filled {
            subject,
            kind,
            tutor,
            room,
        })
    }

    fn value<T>(
        &self,
        term: EnumTerm,
        constant: impl FnOnce(usize) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let value = self.model.enum_value(&term);

        constant(value).ok_or_else(|| DecodeError::UnconfiguredValue {
            sort: sort_name(self.sorts, term),
            value,
        })
    }
}

fn sort_name(sorts: &ScheduleSorts, term: EnumTerm) -> String {
    let sort = term.sort();
    let name = if sort == sorts.subject_sort() {
        "Subject"
    } else if sort == sorts.room_sort() {
        "Room"
    } else if sort == sorts.tutor_sort() {
        "Tutor"
    } else {
        "Kind"
    };

    name.to_owned()
}
