use super::ScheduleAsserts;
use crate::basic_types::SortMismatchError;
use crate::domain::Day;
use crate::domain::LessonTerm;
use crate::domain::Slot;
use crate::smt::Formula;

impl ScheduleAsserts<'_> {
    /// Creates the formula stating that a filled `lesson` has a configured subject and room,
    /// and that its (tutor, subject, kind) is eligible. A blank lesson is always well formed.
    pub fn lesson_well_formed(&self, lesson: &LessonTerm) -> Result<Formula, SortMismatchError> {
        self.problem.check_sort(self.sorts.subject_sort(), &lesson.subject())?;
        self.problem.check_sort(self.sorts.kind_sort(), &lesson.kind())?;
        self.problem.check_sort(self.sorts.tutor_sort(), &lesson.tutor())?;
        self.problem.check_sort(self.sorts.room_sort(), &lesson.room())?;

        let known_subject = self
            .problem
            .is_one_of(lesson.subject(), self.sorts.subject_constants())?;
        let known_room = self
            .problem
            .is_one_of(lesson.room(), self.sorts.room_constants())?;

        let mut eligible = Vec::with_capacity(self.eligibility.len());
        for eligibility in self.eligibility {
            let (Some(tutor), Some(subject)) = (
                self.sorts.tutor(eligibility.tutor),
                self.sorts.subject(eligibility.subject),
            ) else {
                continue;
            };

            eligible.push(Formula::and([
                self.eq(tutor, lesson.tutor())?,
                self.eq(subject, lesson.subject())?,
                self.eq(self.sorts.kind(eligibility.kind), lesson.kind())?,
            ]));
        }

        Ok(Formula::implies(
            lesson.is_filled(),
            Formula::and([known_subject, known_room, Formula::or(eligible)]),
        ))
    }

    /// Creates the formula stating that every lesson of the active constructor of the cell is
    /// well formed.
    pub fn slot_well_formed(
        &self,
        group: usize,
        day: Day,
        slot: Slot,
    ) -> Result<Formula, SortMismatchError> {
        let item = self.schedule.apply(group, day, slot);

        let mut conjuncts = Vec::with_capacity(3);
        for (_, active, lesson) in item.positions() {
            conjuncts.push(Formula::implies(active, self.lesson_well_formed(lesson)?));
        }

        Ok(Formula::and(conjuncts))
    }
}
