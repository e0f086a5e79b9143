use super::Day;
use super::Parity;
use super::ScheduleSorts;
use super::Slot;
use super::DAYS_PER_WEEK;
use super::SLOTS_PER_DAY;
use crate::smt::BoolVar;
use crate::smt::EnumTerm;
use crate::smt::Formula;
use crate::smt::Problem;

/// The symbolic counterpart of [`super::Lesson`].
///
/// The datatype is encoded as a record: `filled` selects the constructor and the remaining
/// fields are the selectors of `Filled`. The selectors of a blank lesson are unconstrained.
#[derive(Clone, Copy, Debug)]
pub struct LessonTerm {
    filled: BoolVar,
    subject: EnumTerm,
    kind: EnumTerm,
    tutor: EnumTerm,
    room: EnumTerm,
}

impl LessonTerm {
    pub fn new(
        filled: BoolVar,
        subject: EnumTerm,
        kind: EnumTerm,
        tutor: EnumTerm,
        room: EnumTerm,
    ) -> LessonTerm {
        LessonTerm {
            filled,
            subject,
            kind,
            tutor,
            room,
        }
    }

    pub fn declare(problem: &mut Problem, sorts: &ScheduleSorts, name: &str) -> LessonTerm {
        LessonTerm::new(
            problem.new_bool(format!("{name}.filled")),
            problem.new_enum(format!("{name}.subject"), sorts.subject_sort()),
            problem.new_enum(format!("{name}.kind"), sorts.kind_sort()),
            problem.new_enum(format!("{name}.tutor"), sorts.tutor_sort()),
            problem.new_enum(format!("{name}.room"), sorts.room_sort()),
        )
    }

    pub fn is_blank(&self) -> Formula {
        Formula::not(self.is_filled())
    }

    pub fn is_filled(&self) -> Formula {
        Formula::var(self.filled)
    }

    pub fn filled(&self) -> BoolVar {
        self.filled
    }

    pub fn subject(&self) -> EnumTerm {
        self.subject
    }

    pub fn kind(&self) -> EnumTerm {
        self.kind
    }

    pub fn tutor(&self) -> EnumTerm {
        self.tutor
    }

    pub fn room(&self) -> EnumTerm {
        self.room
    }
}

/// The symbolic counterpart of [`super::SlotItem`]: `pair` selects the constructor, `single`
/// belongs to `Single` and `numerator`/`denominator` belong to `Pair`.
#[derive(Clone, Copy, Debug)]
pub struct SlotItemTerm {
    pair: BoolVar,
    single: LessonTerm,
    numerator: LessonTerm,
    denominator: LessonTerm,
}

impl SlotItemTerm {
    pub fn declare(problem: &mut Problem, sorts: &ScheduleSorts, name: &str) -> SlotItemTerm {
        SlotItemTerm {
            pair: problem.new_bool(format!("{name}.pair")),
            single: LessonTerm::declare(problem, sorts, &format!("{name}.single")),
            numerator: LessonTerm::declare(problem, sorts, &format!("{name}.numerator")),
            denominator: LessonTerm::declare(problem, sorts, &format!("{name}.denominator")),
        }
    }

    pub fn is_single(&self) -> Formula {
        Formula::not(self.is_pair())
    }

    pub fn is_pair(&self) -> Formula {
        Formula::var(self.pair)
    }

    pub fn pair(&self) -> BoolVar {
        self.pair
    }

    pub fn single(&self) -> &LessonTerm {
        &self.single
    }

    pub fn numerator(&self) -> &LessonTerm {
        &self.numerator
    }

    pub fn denominator(&self) -> &LessonTerm {
        &self.denominator
    }

    /// Every lesson position, with the formula stating that the position belongs to the
    /// active constructor.
    pub fn positions(&self) -> [(Parity, Formula, &LessonTerm); 3] {
        [
            (Parity::Whole, self.is_single(), &self.single),
            (Parity::Numerator, self.is_pair(), &self.numerator),
            (Parity::Denominator, self.is_pair(), &self.denominator),
        ]
    }

    /// Holds for `Single(Blank)` and `Pair(Blank, Blank)`.
    pub fn is_blank(&self) -> Formula {
        Formula::or([
            Formula::and([self.is_single(), self.single.is_blank()]),
            Formula::and([
                self.is_pair(),
                self.numerator.is_blank(),
                self.denominator.is_blank(),
            ]),
        ])
    }
}

/// The total mapping (group, day, slot) -> slot item, one [`SlotItemTerm`] per cell.
#[derive(Clone, Debug)]
pub struct ScheduleFunction {
    groups: usize,
    cells: Vec<SlotItemTerm>,
}

impl ScheduleFunction {
    pub fn declare(problem: &mut Problem, sorts: &ScheduleSorts) -> ScheduleFunction {
        let groups = sorts.groups().len();
        let mut cells = Vec::with_capacity(groups * DAYS_PER_WEEK * SLOTS_PER_DAY);

        for group in sorts.groups().ids() {
            for day in Day::ALL {
                for slot in Slot::all() {
                    let name = format!("{group}.{}.s{}", day.short_name(), slot.index() + 1);
                    cells.push(SlotItemTerm::declare(problem, sorts, &name));
                }
            }
        }

        ScheduleFunction { groups, cells }
    }

    pub fn num_groups(&self) -> usize {
        self.groups
    }

    pub fn get(&self, group: usize, day: Day, slot: Slot) -> Option<&SlotItemTerm> {
        if group >= self.groups {
            return None;
        }

        self.cells
            .get((group * DAYS_PER_WEEK + day.index()) * SLOTS_PER_DAY + slot.index())
    }

    /// The slot item of a cell.
    ///
    /// # Panics
    /// If `group` is not the index of a configured group.
    pub fn apply(&self, group: usize, day: Day, slot: Slot) -> &SlotItemTerm {
        match self.get(group, day, slot) {
            Some(item) => item,
            None => panic!("group index {group} is out of range for {} groups", self.groups),
        }
    }
}
