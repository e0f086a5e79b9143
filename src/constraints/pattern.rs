use super::ScheduleAsserts;
use crate::domain::Day;
use crate::domain::Slot;
use crate::domain::SLOTS_PER_DAY;
use crate::smt::Formula;

impl ScheduleAsserts<'_> {
    /// Creates the formula stating that the non-blank slots of `group` on `day` are either none
    /// at all, or one contiguous run whose length lies within the configured bounds.
    ///
    /// Every admissible (offset, length) window is enumerated explicitly.
    pub fn daily_pattern_valid(&self, group: usize, day: Day) -> Formula {
        let blank = Slot::all()
            .map(|slot| self.schedule.apply(group, day, slot).is_blank())
            .collect::<Vec<_>>();

        let min = self.options.min_lessons_per_day;
        let max = self.options.max_lessons_per_day.min(SLOTS_PER_DAY);

        let empty_day = Formula::and(blank.iter().cloned());
        let windows = (min..=max).flat_map(|length| {
            let blank = &blank;
            (0..=SLOTS_PER_DAY - length).map(move |offset| {
                Formula::and(blank.iter().enumerate().map(|(slot, is_blank)| {
                    if (offset..offset + length).contains(&slot) {
                        Formula::not(is_blank.clone())
                    } else {
                        is_blank.clone()
                    }
                }))
            })
        });

        Formula::or(std::iter::once(empty_day).chain(windows))
    }
}
