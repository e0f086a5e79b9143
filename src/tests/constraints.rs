#![cfg(test)]
//! Evaluates the schedule constraints on hand-built valuations, independently of any backend.

use std::collections::BTreeSet;

use crate::basic_types::Load;
use crate::constraints::ScheduleAsserts;
use crate::domain::ConstantTable;
use crate::domain::Day;
use crate::domain::GroupId;
use crate::domain::Lesson;
use crate::domain::LessonKind;
use crate::domain::LessonTerm;
use crate::domain::RoomId;
use crate::domain::ScheduleFunction;
use crate::domain::ScheduleSorts;
use crate::domain::Slot;
use crate::domain::SlotItem;
use crate::domain::SlotItemTerm;
use crate::domain::SubjectId;
use crate::domain::TutorId;
use crate::generator::Eligibility;
use crate::generator::GeneratorOptions;
use crate::generator::RequiredLoad;
use crate::generator::SlotItemTypeQuota;
use crate::smt::EnumTerm;
use crate::smt::Formula;
use crate::smt::Model;
use crate::smt::Problem;

const MATHS: SubjectId = SubjectId(1);
const CHEMISTRY: SubjectId = SubjectId(2);

struct Fixture {
    problem: Problem,
    sorts: ScheduleSorts,
    schedule: ScheduleFunction,
    eligibility: BTreeSet<Eligibility>,
    options: GeneratorOptions,
}

impl Fixture {
    fn new(groups: usize) -> Fixture {
        let mut problem = Problem::default();
        let sorts = ScheduleSorts::declare(
            &mut problem,
            ConstantTable::from_ids([MATHS, CHEMISTRY]),
            ConstantTable::from_ids([RoomId(1), RoomId(2)]),
            ConstantTable::from_ids([TutorId(1), TutorId(2)]),
            ConstantTable::from_ids((1..=groups as u32).map(GroupId)),
        );
        let schedule = ScheduleFunction::declare(&mut problem, &sorts);

        Fixture {
            problem,
            sorts,
            schedule,
            eligibility: [
                Eligibility::new(Some(TutorId(1)), MATHS, LessonKind::Lecture),
                Eligibility::new(Some(TutorId(2)), MATHS, LessonKind::Seminar),
                Eligibility::new(Some(TutorId(1)), MATHS, LessonKind::Seminar),
                Eligibility::new(None, CHEMISTRY, LessonKind::Lab),
            ]
            .into_iter()
            .collect(),
            options: GeneratorOptions::default(),
        }
    }

    fn lesson(&mut self, name: &str) -> LessonTerm {
        LessonTerm::declare(&mut self.problem, &self.sorts, name)
    }

    fn asserts(&self) -> ScheduleAsserts<'_> {
        ScheduleAsserts::new(
            &self.problem,
            &self.sorts,
            &self.schedule,
            &self.eligibility,
            &self.options,
        )
    }

    fn cell(&self, group: usize, day: Day, slot: usize) -> &SlotItemTerm {
        self.schedule.apply(group, day, slot_at(slot))
    }

    fn valuation(&self) -> Valuation<'_> {
        Valuation {
            sorts: &self.sorts,
            bools: vec![false; self.problem.num_bool_vars()],
            enums: vec![0; self.problem.enum_vars().len()],
        }
    }
}

/// A valuation under construction; variables which are not set are false or take the first
/// value of their sort.
struct Valuation<'a> {
    sorts: &'a ScheduleSorts,
    bools: Vec<bool>,
    enums: Vec<usize>,
}

impl Valuation<'_> {
    fn set_lesson(&mut self, term: &LessonTerm, lesson: Lesson) -> &mut Self {
        self.bools[term.filled().index()] = lesson.is_filled();

        if let Lesson::Filled {
            subject,
            kind,
            tutor,
            room,
        } = lesson
        {
            let subject = self.sorts.subject(subject).expect("configured subject");
            let tutor = self.sorts.tutor(tutor).expect("configured tutor");
            let room = self.sorts.room(room).expect("configured room");

            self.set_enum(term.subject(), value(subject));
            self.set_enum(term.kind(), value(self.sorts.kind(kind)));
            self.set_enum(term.tutor(), value(tutor));
            self.set_enum(term.room(), value(room));
        }

        self
    }

    fn set_item(&mut self, term: &SlotItemTerm, item: SlotItem) -> &mut Self {
        self.bools[term.pair().index()] = item.is_pair();

        match item {
            SlotItem::Single(lesson) => self.set_lesson(term.single(), lesson),
            SlotItem::Pair {
                numerator,
                denominator,
            } => self
                .set_lesson(term.numerator(), numerator)
                .set_lesson(term.denominator(), denominator),
        }
    }

    fn set_enum(&mut self, term: EnumTerm, value: usize) {
        match term {
            EnumTerm::Var { var, .. } => self.enums[var.index()] = value,
            EnumTerm::Const { .. } => panic!("cannot assign a constant"),
        }
    }

    fn holds(&self, formula: &Formula) -> bool {
        Model::new(self.bools.clone(), self.enums.clone()).eval(formula)
    }
}

fn value(term: EnumTerm) -> usize {
    match term {
        EnumTerm::Const { value, .. } => value,
        EnumTerm::Var { .. } => panic!("not a constant"),
    }
}

fn slot_at(index: usize) -> Slot {
    Slot::new(index).expect("slot in range")
}

fn filled(subject: SubjectId, kind: LessonKind, tutor: Option<u32>, room: u32) -> Lesson {
    Lesson::Filled {
        subject,
        kind,
        tutor: tutor.map(TutorId),
        room: RoomId(room),
    }
}

fn maths_lecture(room: u32) -> Lesson {
    filled(MATHS, LessonKind::Lecture, Some(1), room)
}

fn maths_seminar(tutor: u32, room: u32) -> Lesson {
    filled(MATHS, LessonKind::Seminar, Some(tutor), room)
}

fn chemistry_lab(room: u32) -> Lesson {
    filled(CHEMISTRY, LessonKind::Lab, None, room)
}

fn pair(numerator: Lesson, denominator: Lesson) -> SlotItem {
    SlotItem::Pair {
        numerator,
        denominator,
    }
}

/// Whether `first` and `second` are compatible according to the formula.
fn compatible(first: Lesson, second: Lesson) -> bool {
    let mut fixture = Fixture::new(0);
    let a = fixture.lesson("a");
    let b = fixture.lesson("b");

    let formula = fixture
        .asserts()
        .lessons_compatible(&a, &b)
        .expect("well sorted");
    fixture
        .valuation()
        .set_lesson(&a, first)
        .set_lesson(&b, second)
        .holds(&formula)
}

#[test]
fn blank_lessons_are_compatible() {
    assert!(compatible(Lesson::Blank, Lesson::Blank));
}

#[test]
fn shared_lectures_must_coincide() {
    assert!(compatible(maths_lecture(1), maths_lecture(1)));
    assert!(!compatible(maths_lecture(1), maths_lecture(2)));
    assert!(!compatible(
        maths_lecture(1),
        filled(CHEMISTRY, LessonKind::Lecture, Some(1), 1)
    ));
}

#[test]
fn lectures_cannot_face_a_blank_or_another_kind() {
    assert!(!compatible(maths_lecture(1), Lesson::Blank));
    assert!(!compatible(Lesson::Blank, maths_lecture(1)));
    assert!(!compatible(maths_lecture(1), maths_seminar(2, 2)));
}

#[test]
fn practices_may_face_a_blank() {
    assert!(compatible(maths_seminar(2, 1), Lesson::Blank));
    assert!(compatible(Lesson::Blank, chemistry_lab(1)));
}

#[test]
fn concurrent_practices_need_distinct_tutors_and_rooms() {
    assert!(compatible(maths_seminar(2, 1), maths_seminar(1, 2)));
    assert!(!compatible(maths_seminar(2, 1), maths_seminar(2, 2)));
    assert!(!compatible(maths_seminar(2, 1), maths_seminar(1, 1)));
}

#[test]
fn practices_without_tutor_only_need_distinct_rooms() {
    assert!(compatible(chemistry_lab(1), chemistry_lab(2)));
    assert!(!compatible(chemistry_lab(1), chemistry_lab(1)));
}

#[test]
fn cross_group_cells_must_have_the_same_shape() {
    let fixture = Fixture::new(2);
    let formula = fixture
        .asserts()
        .cross_group_compatible(0, 1, Day::Monday, slot_at(0))
        .expect("well sorted");
    let first = fixture.cell(0, Day::Monday, 0);
    let second = fixture.cell(1, Day::Monday, 0);

    let holds = |a: SlotItem, b: SlotItem| {
        fixture
            .valuation()
            .set_item(first, a)
            .set_item(second, b)
            .holds(&formula)
    };

    assert!(holds(SlotItem::BLANK, SlotItem::BLANK));
    assert!(!holds(
        SlotItem::Single(maths_seminar(2, 1)),
        pair(Lesson::Blank, Lesson::Blank)
    ));
    assert!(holds(
        pair(maths_seminar(2, 1), Lesson::Blank),
        pair(Lesson::Blank, chemistry_lab(1))
    ));
    assert!(!holds(
        pair(maths_lecture(1), Lesson::Blank),
        pair(Lesson::Blank, Lesson::Blank)
    ));
}

#[test]
fn filled_lessons_must_be_eligible() {
    let mut fixture = Fixture::new(0);
    let lesson = fixture.lesson("l");
    let formula = fixture
        .asserts()
        .lesson_well_formed(&lesson)
        .expect("well sorted");

    let holds = |content: Lesson| {
        fixture
            .valuation()
            .set_lesson(&lesson, content)
            .holds(&formula)
    };

    assert!(holds(Lesson::Blank));
    assert!(holds(maths_lecture(2)));
    assert!(holds(chemistry_lab(1)));
    assert!(!holds(filled(MATHS, LessonKind::Lecture, Some(2), 1)));
    assert!(!holds(filled(CHEMISTRY, LessonKind::Lab, Some(1), 1)));
    assert!(!holds(filled(CHEMISTRY, LessonKind::Seminar, None, 1)));
}

#[test]
fn filled_lessons_need_configured_values() {
    let mut fixture = Fixture::new(0);
    let lesson = fixture.lesson("l");
    let formula = fixture
        .asserts()
        .lesson_well_formed(&lesson)
        .expect("well sorted");

    let unknown_subject = fixture.sorts.subjects().len();
    let unknown_room = fixture.sorts.rooms().len();

    let mut valuation = fixture.valuation();
    valuation
        .set_lesson(&lesson, maths_lecture(1))
        .set_enum(lesson.subject(), unknown_subject);
    assert!(!valuation.holds(&formula));

    let mut valuation = fixture.valuation();
    valuation
        .set_lesson(&lesson, maths_lecture(1))
        .set_enum(lesson.room(), unknown_room);
    assert!(!valuation.holds(&formula));
}

#[test]
fn swapped_terms_are_reported_as_sort_mismatch() {
    let mut fixture = Fixture::new(0);
    let lesson = fixture.lesson("l");
    let swapped = LessonTerm::new(
        lesson.filled(),
        lesson.room(),
        lesson.kind(),
        lesson.tutor(),
        lesson.subject(),
    );

    let error = fixture
        .asserts()
        .lesson_well_formed(&swapped)
        .expect_err("room used as subject");
    assert_eq!(error.expected, "Subject");
    assert_eq!(error.found, "Room");

    assert!(fixture
        .asserts()
        .lessons_compatible(&lesson, &swapped)
        .is_err());
}

/// Whether the daily pattern of Monday holds when the given slots hold a seminar.
fn pattern_holds(fixture: &Fixture, occupied: &[usize]) -> bool {
    let formula = fixture.asserts().daily_pattern_valid(0, Day::Monday);
    let mut valuation = fixture.valuation();

    for &slot in occupied {
        let _ = valuation.set_item(
            fixture.cell(0, Day::Monday, slot),
            SlotItem::Single(maths_seminar(2, 1)),
        );
    }

    valuation.holds(&formula)
}

#[test]
fn daily_runs_must_be_contiguous_and_bounded() {
    let fixture = Fixture::new(1);

    assert!(pattern_holds(&fixture, &[]));
    assert!(pattern_holds(&fixture, &[1, 2]));
    assert!(pattern_holds(&fixture, &[3, 4, 5, 6]));
    assert!(!pattern_holds(&fixture, &[0, 2]));
    assert!(!pattern_holds(&fixture, &[4]));
    assert!(!pattern_holds(&fixture, &[0, 1, 2, 3, 4]));
}

#[test]
fn run_bounds_follow_the_options() {
    let mut fixture = Fixture::new(1);
    fixture.options.min_lessons_per_day = 1;
    fixture.options.max_lessons_per_day = 7;

    assert!(pattern_holds(&fixture, &[6]));
    assert!(pattern_holds(&fixture, &[0, 1, 2, 3, 4, 5, 6]));
    assert!(!pattern_holds(&fixture, &[0, 6]));
}

#[test]
fn blank_pairs_do_not_count_as_lessons() {
    let fixture = Fixture::new(1);
    let formula = fixture.asserts().daily_pattern_valid(0, Day::Monday);

    let mut valuation = fixture.valuation();
    let _ = valuation.set_item(
        fixture.cell(0, Day::Monday, 3),
        pair(Lesson::Blank, Lesson::Blank),
    );
    assert!(valuation.holds(&formula));

    let _ = valuation.set_item(
        fixture.cell(0, Day::Monday, 3),
        pair(Lesson::Blank, chemistry_lab(1)),
    );
    assert!(!valuation.holds(&formula));
}

/// Monday holds a maths lecture and a pair with a lecture on numerator weeks only.
fn one_and_a_half_lectures(fixture: &Fixture) -> Valuation<'_> {
    let mut valuation = fixture.valuation();
    let _ = valuation
        .set_item(
            fixture.cell(0, Day::Monday, 0),
            SlotItem::Single(maths_lecture(1)),
        )
        .set_item(
            fixture.cell(0, Day::Monday, 1),
            pair(maths_lecture(1), Lesson::Blank),
        );
    valuation
}

#[test]
fn pair_sides_count_as_half_lessons() {
    let fixture = Fixture::new(1);
    let valuation = one_and_a_half_lectures(&fixture);

    let load_of = |halves: u32| {
        let mut load = RequiredLoad::default();
        load.set(MATHS, LessonKind::Lecture, Load::from_halves(halves));
        fixture
            .asserts()
            .weekly_load_valid(0, &load)
            .expect("well sorted")
    };

    assert!(valuation.holds(&load_of(3)));
    assert!(!valuation.holds(&load_of(2)));
    assert!(!valuation.holds(&load_of(4)));
}

#[test]
fn loads_of_other_subjects_must_be_absent() {
    let fixture = Fixture::new(1);
    let valuation = one_and_a_half_lectures(&fixture);

    let mut load = RequiredLoad::default();
    load.set(MATHS, LessonKind::Lecture, Load::from_halves(3));
    load.set(CHEMISTRY, LessonKind::Lab, Load::whole(1));
    let formula = fixture
        .asserts()
        .weekly_load_valid(0, &load)
        .expect("well sorted");

    assert!(!valuation.holds(&formula));
}

#[test]
fn quotas_count_items_by_shape() {
    let fixture = Fixture::new(1);
    let valuation = one_and_a_half_lectures(&fixture);

    let quota = |single, pair, half| {
        fixture
            .asserts()
            .slot_item_type_quota(0, &SlotItemTypeQuota { single, pair, half })
    };

    assert!(valuation.holds(&quota(1, 0, 1)));
    assert!(!valuation.holds(&quota(2, 0, 0)));
    assert!(!valuation.holds(&quota(1, 1, 0)));
}

#[test]
fn quotas_beyond_the_weekly_capacity_are_false() {
    let fixture = Fixture::new(1);
    let quota = SlotItemTypeQuota {
        single: 20,
        pair: 4,
        half: 1,
    };

    assert!(fixture
        .asserts()
        .slot_item_type_quota(0, &quota)
        .is_const(false));
}
