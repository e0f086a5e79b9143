//! Synthesises the formula whose satisfying assignments are exactly the valid timetables.
//!
//! Every sub-constraint is a plain [`Formula`] built from the symbolic [`ScheduleFunction`];
//! [`ScheduleAsserts::valid_schedule`] conjoins them for all groups, days and slots. Helpers
//! which compare enumerated terms check the sorts of their arguments and fail with a
//! [`SortMismatchError`] on a mismatch.
mod compatibility;
mod load;
mod pattern;
mod well_formed;

use std::collections::BTreeSet;

use crate::basic_types::SortMismatchError;
use crate::domain::Day;
use crate::domain::LessonKind;
use crate::domain::LessonTerm;
use crate::domain::ScheduleFunction;
use crate::domain::ScheduleSorts;
use crate::domain::Slot;
use crate::domain::SubjectId;
use crate::generator::Eligibility;
use crate::generator::GeneratorOptions;
use crate::generator::RequiredLoad;
use crate::generator::SlotItemTypeQuota;
use crate::smt::EnumTerm;
use crate::smt::Formula;
use crate::smt::Problem;

/// The constraints over one [`ScheduleFunction`].
#[derive(Clone, Copy, Debug)]
pub struct ScheduleAsserts<'a> {
    problem: &'a Problem,
    sorts: &'a ScheduleSorts,
    schedule: &'a ScheduleFunction,
    eligibility: &'a BTreeSet<Eligibility>,
    options: &'a GeneratorOptions,
}

impl<'a> ScheduleAsserts<'a> {
    pub fn new(
        problem: &'a Problem,
        sorts: &'a ScheduleSorts,
        schedule: &'a ScheduleFunction,
        eligibility: &'a BTreeSet<Eligibility>,
        options: &'a GeneratorOptions,
    ) -> ScheduleAsserts<'a> {
        ScheduleAsserts {
            problem,
            sorts,
            schedule,
            eligibility,
            options,
        }
    }

    /// Creates the formula stating that the schedule is valid, given the effective load and
    /// slot item quota of every group (both indexed like the groups of the sorts).
    ///
    /// It is the conjunction of:
    /// - [`Self::daily_pattern_valid`] for every group and day,
    /// - [`Self::weekly_load_valid`] and [`Self::slot_item_type_quota`] for every group,
    /// - [`Self::slot_well_formed`] for every cell,
    /// - [`Self::cross_group_compatible`] for every unordered pair of distinct groups and every
    ///   (day, slot).
    pub fn valid_schedule(
        &self,
        loads: &[&RequiredLoad],
        quotas: &[SlotItemTypeQuota],
    ) -> Result<Formula, SortMismatchError> {
        let groups = self.schedule.num_groups();
        let mut conjuncts = Vec::new();

        for group in 0..groups {
            for day in Day::ALL {
                conjuncts.push(self.daily_pattern_valid(group, day));
            }

            conjuncts.push(self.weekly_load_valid(group, loads[group])?);
            conjuncts.push(self.slot_item_type_quota(group, &quotas[group]));

            for day in Day::ALL {
                for slot in Slot::all() {
                    conjuncts.push(self.slot_well_formed(group, day, slot)?);
                }
            }
        }

        for first in 0..groups {
            for second in first + 1..groups {
                for day in Day::ALL {
                    for slot in Slot::all() {
                        conjuncts.push(self.cross_group_compatible(first, second, day, slot)?);
                    }
                }
            }
        }

        Ok(Formula::and(conjuncts))
    }

    /// `expected == term`, where `term` must be of the sort of `expected`.
    fn eq(&self, expected: EnumTerm, term: EnumTerm) -> Result<Formula, SortMismatchError> {
        self.problem.eq(expected, term)
    }

    fn is_lecture(&self, lesson: &LessonTerm) -> Result<Formula, SortMismatchError> {
        self.eq(self.sorts.kind(LessonKind::Lecture), lesson.kind())
    }

    /// `lesson` is filled with the given subject and kind.
    fn teaches(
        &self,
        lesson: &LessonTerm,
        subject: SubjectId,
        kind: LessonKind,
    ) -> Result<Formula, SortMismatchError> {
        let Some(subject) = self.sorts.subject(subject) else {
            return Ok(Formula::FALSE);
        };

        Ok(Formula::and([
            lesson.is_filled(),
            self.eq(subject, lesson.subject())?,
            self.eq(self.sorts.kind(kind), lesson.kind())?,
        ]))
    }
}
