use super::ScheduleAsserts;
use crate::basic_types::SortMismatchError;
use crate::domain::Day;
use crate::domain::LessonTerm;
use crate::domain::Slot;
use crate::smt::Formula;

impl ScheduleAsserts<'_> {
    /// Creates the formula stating that two lessons may take place at the same time in two
    /// different groups. Exactly one of these holds for a compatible pair:
    /// - both are blank;
    /// - both are lectures of the same subject, given by the same tutor in the same room;
    /// - one is blank and the other is not a lecture;
    /// - neither is a lecture and they share neither tutor nor room.
    ///
    /// Two lessons without a tutor do not share a tutor.
    pub fn lessons_compatible(
        &self,
        first: &LessonTerm,
        second: &LessonTerm,
    ) -> Result<Formula, SortMismatchError> {
        let first_lecture = self.is_lecture(first)?;
        let second_lecture = self.is_lecture(second)?;

        let same_subject = self.eq(first.subject(), second.subject())?;
        let same_tutor = self.eq(first.tutor(), second.tutor())?;
        let same_room = self.eq(first.room(), second.room())?;
        let tutor_absent = self.eq(self.sorts.absent_tutor(), first.tutor())?;

        let both_blank = Formula::and([first.is_blank(), second.is_blank()]);

        let shared_lecture = Formula::and([
            first.is_filled(),
            second.is_filled(),
            first_lecture.clone(),
            second_lecture.clone(),
            same_subject,
            same_tutor.clone(),
            same_room.clone(),
        ]);

        let blank_and_practice = Formula::or([
            Formula::and([
                first.is_blank(),
                second.is_filled(),
                Formula::not(second_lecture.clone()),
            ]),
            Formula::and([
                first.is_filled(),
                Formula::not(first_lecture.clone()),
                second.is_blank(),
            ]),
        ]);

        let disjoint_practices = Formula::and([
            first.is_filled(),
            second.is_filled(),
            Formula::not(first_lecture),
            Formula::not(second_lecture),
            Formula::or([Formula::not(same_tutor), tutor_absent]),
            Formula::not(same_room),
        ]);

        Ok(Formula::or([
            both_blank,
            shared_lecture,
            blank_and_practice,
            disjoint_practices,
        ]))
    }

    /// Creates the formula stating that the cells of two groups at the same (day, slot) have the
    /// same shape and that the lessons at corresponding positions are
    /// [compatible](Self::lessons_compatible).
    pub fn cross_group_compatible(
        &self,
        first: usize,
        second: usize,
        day: Day,
        slot: Slot,
    ) -> Result<Formula, SortMismatchError> {
        let a = self.schedule.apply(first, day, slot);
        let b = self.schedule.apply(second, day, slot);

        let singles = Formula::and([
            a.is_single(),
            b.is_single(),
            self.lessons_compatible(a.single(), b.single())?,
        ]);
        let pairs = Formula::and([
            a.is_pair(),
            b.is_pair(),
            self.lessons_compatible(a.numerator(), b.numerator())?,
            self.lessons_compatible(a.denominator(), b.denominator())?,
        ]);

        Ok(Formula::or([singles, pairs]))
    }
}
