use log::debug;

use super::ScheduleAsserts;
use crate::basic_types::SortMismatchError;
use crate::domain::Day;
use crate::domain::LessonKind;
use crate::domain::Parity;
use crate::domain::Slot;
use crate::domain::SlotItemTerm;
use crate::domain::DAYS_PER_WEEK;
use crate::generator::RequiredLoad;
use crate::generator::SlotItemTypeQuota;
use crate::smt::Formula;

impl ScheduleAsserts<'_> {
    /// Creates the formula stating that, for every subject and kind, the lessons of `group`
    /// add up to exactly the required weekly load.
    ///
    /// A `Single` lesson counts as one lesson and each side of a `Pair` as half a lesson. The
    /// sums are taken in half lessons, so a single weighs 2 and a pair side 1.
    pub fn weekly_load_valid(
        &self,
        group: usize,
        load: &RequiredLoad,
    ) -> Result<Formula, SortMismatchError> {
        let mut conjuncts = Vec::new();

        for &subject in self.sorts.subjects().ids() {
            for kind in LessonKind::ALL {
                let mut terms = Vec::new();

                for item in self.cells(group) {
                    for (parity, active, lesson) in item.positions() {
                        let weight = if parity == Parity::Whole { 2 } else { 1 };
                        let matches = Formula::and([active, self.teaches(lesson, subject, kind)?]);
                        terms.push((weight, matches));
                    }
                }

                conjuncts.push(Formula::count_eq(terms, load.get(subject, kind).halves()));
            }
        }

        Ok(Formula::and(conjuncts))
    }

    /// Creates the formula stating that `group` has exactly as many filled singles, fully filled
    /// pairs and half filled pairs as `quota` asks for.
    ///
    /// Every counted item occupies a non-blank slot, so a quota beyond the number of slots the
    /// daily runs can occupy is unsatisfiable and is folded to `false` right away.
    pub fn slot_item_type_quota(&self, group: usize, quota: &SlotItemTypeQuota) -> Formula {
        let capacity = DAYS_PER_WEEK * self.options.max_lessons_per_day;
        if quota.total() as usize > capacity {
            debug!(
                "quota of {} slot items exceeds the capacity of {capacity} slots",
                quota.total()
            );
            return Formula::FALSE;
        }

        let singles = self.cells(group).map(|item| {
            (
                1,
                Formula::and([item.is_single(), item.single().is_filled()]),
            )
        });
        let pairs = self.cells(group).map(|item| {
            (
                1,
                Formula::and([
                    item.is_pair(),
                    item.numerator().is_filled(),
                    item.denominator().is_filled(),
                ]),
            )
        });
        let halves = self.cells(group).map(|item| {
            (
                1,
                Formula::and([
                    item.is_pair(),
                    Formula::xor(item.numerator().is_blank(), item.denominator().is_blank()),
                ]),
            )
        });

        Formula::and([
            Formula::count_eq(singles, quota.single),
            Formula::count_eq(pairs, quota.pair),
            Formula::count_eq(halves, quota.half),
        ])
    }

    /// The slot items of `group`, day by day.
    fn cells(&self, group: usize) -> impl Iterator<Item = &SlotItemTerm> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            Slot::all().map(move |slot| self.schedule.apply(group, day, slot))
        })
    }
}
