#![cfg(test)]

mod constraints;

use std::collections::BTreeSet;

use crate::decoder::GroupSchedule;
use crate::decoder::Schedule;
use crate::domain::Day;
use crate::domain::Lesson;
use crate::domain::LessonKind;
use crate::domain::Slot;
use crate::domain::SlotItem;
use crate::generator::Curriculum;
use crate::smt::Backend;
use crate::smt::Problem;
use crate::smt::Verdict;

/// Counts how often the wrapped backend is asked to decide a problem.
#[derive(Debug)]
pub(crate) struct CountingBackend<B> {
    inner: B,
    pub(crate) calls: usize,
}

impl<B> CountingBackend<B> {
    pub(crate) fn new(inner: B) -> Self {
        CountingBackend { inner, calls: 0 }
    }
}

impl<B: Backend> Backend for CountingBackend<B> {
    fn check(&mut self, problem: &Problem) -> Verdict {
        self.calls += 1;
        self.inner.check(problem)
    }
}

/// A backend which always gives up.
#[derive(Debug)]
pub(crate) struct GivingUpBackend;

impl Backend for GivingUpBackend {
    fn check(&mut self, _: &Problem) -> Verdict {
        Verdict::Unknown("time limit reached".to_owned())
    }
}

/// Every day of every group is empty or holds one run of `min..=max` consecutive lessons.
pub(crate) fn assert_daily_runs(schedule: &Schedule, min: usize, max: usize) {
    for group in &schedule.groups {
        for day in &group.days {
            let occupied = day.occupied_slots().collect::<Vec<_>>();
            let (Some(&first), Some(&last)) = (occupied.first(), occupied.last()) else {
                continue;
            };

            assert_eq!(
                last - first + 1,
                occupied.len(),
                "{} has gaps on {}: {occupied:?}",
                group.group,
                day.day
            );
            assert!(
                (min..=max).contains(&occupied.len()),
                "{} has a run of {} lessons on {}",
                group.group,
                occupied.len(),
                day.day
            );
        }
    }
}

/// Every group is given exactly its required load.
pub(crate) fn assert_weekly_loads(schedule: &Schedule, curriculum: &Curriculum) {
    for group in &schedule.groups {
        let required = curriculum.group_load(group.group);

        for subject in curriculum.subjects() {
            for kind in LessonKind::ALL {
                assert_eq!(
                    group.weekly_load(subject, kind),
                    required.get(subject, kind),
                    "{} has the wrong load of {subject} {kind}",
                    group.group
                );
            }
        }
    }
}

/// Every lesson is eligible and held in a configured room.
pub(crate) fn assert_well_formed(schedule: &Schedule, curriculum: &Curriculum) {
    let eligible = curriculum
        .eligibility()
        .iter()
        .map(|eligibility| (eligibility.tutor, eligibility.subject, eligibility.kind))
        .collect::<BTreeSet<_>>();

    for group in &schedule.groups {
        for lesson in group.assignments() {
            assert!(eligible.contains(&(lesson.tutor, lesson.subject, lesson.kind)));
            assert!(curriculum.rooms().index_of(lesson.room).is_some());
        }
    }
}

/// No two groups clash in any (day, slot).
pub(crate) fn assert_cross_group_compatible(schedule: &Schedule) {
    for (index, first) in schedule.groups.iter().enumerate() {
        for second in &schedule.groups[index + 1..] {
            for day in Day::ALL {
                for slot in Slot::all() {
                    let a = cell(first, day, slot);
                    let b = cell(second, day, slot);

                    assert_eq!(
                        a.is_pair(),
                        b.is_pair(),
                        "{} and {} disagree on the shape of {day} {slot}",
                        first.group,
                        second.group
                    );
                    for ((_, x), (_, y)) in a.lessons().zip(b.lessons()) {
                        assert!(
                            lessons_compatible(x, y),
                            "{} and {} clash on {day} {slot}: {x:?} / {y:?}",
                            first.group,
                            second.group
                        );
                    }
                }
            }
        }
    }
}

pub(crate) fn cell(group: &GroupSchedule, day: Day, slot: Slot) -> SlotItem {
    group.days[day.index()].slot_item(slot)
}

fn lessons_compatible(first: Lesson, second: Lesson) -> bool {
    match (first, second) {
        (Lesson::Blank, Lesson::Blank) => true,
        (Lesson::Blank, other) | (other, Lesson::Blank) => !other.is_lecture(),
        (
            Lesson::Filled {
                subject: s1,
                kind: k1,
                tutor: t1,
                room: r1,
            },
            Lesson::Filled {
                subject: s2,
                kind: k2,
                tutor: t2,
                room: r2,
            },
        ) => match (k1, k2) {
            (LessonKind::Lecture, LessonKind::Lecture) => s1 == s2 && t1 == t2 && r1 == r2,
            (LessonKind::Lecture, _) | (_, LessonKind::Lecture) => false,
            _ => (t1 != t2 || t1.is_none()) && r1 != r2,
        },
    }
}
