//! Orchestrates one generation run: the input is turned into domain constants, the constraint
//! formula is built once and handed to a [`Backend`], and a satisfying valuation is exposed for
//! decoding.
mod input;
mod options;

use std::time::Instant;

pub use input::Curriculum;
pub use input::Eligibility;
pub use input::RequiredLoad;
pub use input::SlotItemTypeQuota;
pub use options::GeneratorOptions;
pub use options::QuotaPolicy;

use log::debug;
use log::info;

use crate::basic_types::BuildError;
use crate::basic_types::ConfigurationError;
use crate::basic_types::DecodeError;
use crate::constraints::ScheduleAsserts;
use crate::decoder::Schedule;
use crate::decoder::ScheduleModel;
use crate::domain::ConstantTable;
use crate::domain::GroupId;
use crate::domain::RoomId;
use crate::domain::ScheduleFunction;
use crate::domain::ScheduleSorts;
use crate::sat::SplrBackend;
use crate::smt::Backend;
pub use crate::smt::Outcome;
use crate::smt::Problem;
use crate::smt::Verdict;

/// Generates the timetables of the groups of a [`Curriculum`].
///
/// The formula is built on the first call to [`ScheduleGenerator::check`] (or
/// [`ScheduleGenerator::build`]) and the backend is consulted at most once; later calls return
/// the remembered outcome. Every generator owns its problem and backend exclusively.
#[derive(Debug)]
pub struct ScheduleGenerator<B = SplrBackend> {
    curriculum: Curriculum,
    options: GeneratorOptions,
    /// The quota derived from the base required load.
    quota: SlotItemTypeQuota,
    backend: B,
    built: Option<BuiltProblem>,
    verdict: Option<Verdict>,
}

impl ScheduleGenerator<SplrBackend> {
    /// Create a generator with the default options and the `splr` backend.
    pub fn new(curriculum: Curriculum) -> ScheduleGenerator<SplrBackend> {
        let options = GeneratorOptions::default();
        ScheduleGenerator::create(curriculum, options, SplrBackend::new(options.linear_encoding))
    }

    pub fn with_options(
        curriculum: Curriculum,
        options: GeneratorOptions,
    ) -> Result<ScheduleGenerator<SplrBackend>, ConfigurationError> {
        ScheduleGenerator::with_backend(
            curriculum,
            options,
            SplrBackend::new(options.linear_encoding),
        )
    }

    /// Validate the raw input and create a generator for it with default options.
    pub fn initialize(
        load: RequiredLoad,
        eligibility: impl IntoIterator<Item = Eligibility>,
        rooms: impl IntoIterator<Item = RoomId>,
        groups: impl IntoIterator<Item = GroupId>,
    ) -> Result<ScheduleGenerator<SplrBackend>, ConfigurationError> {
        let curriculum = Curriculum::new(load, eligibility, rooms, groups)?;
        Ok(ScheduleGenerator::new(curriculum))
    }
}

impl<B: Backend> ScheduleGenerator<B> {
    pub fn with_backend(
        curriculum: Curriculum,
        options: GeneratorOptions,
        backend: B,
    ) -> Result<ScheduleGenerator<B>, ConfigurationError> {
        options.validate()?;
        Ok(ScheduleGenerator::create(curriculum, options, backend))
    }

    fn create(curriculum: Curriculum, options: GeneratorOptions, backend: B) -> Self {
        let quota = SlotItemTypeQuota::from_load(curriculum.load());
        debug!("slot item quota: {quota:?}");

        ScheduleGenerator {
            curriculum,
            options,
            quota,
            backend,
            built: None,
            verdict: None,
        }
    }

    /// Build the constraint formula, unless it was built before.
    pub fn build(&mut self) -> Result<&Problem, BuildError> {
        let built = BuiltProblem::get_or_build(&mut self.built, &self.curriculum, &self.options)?;
        Ok(&built.problem)
    }

    /// Decide whether a valid timetable exists.
    ///
    /// Only the first call builds the formula and runs the backend.
    pub fn check(&mut self) -> Result<Outcome, BuildError> {
        if let Some(verdict) = &self.verdict {
            return Ok(verdict.outcome());
        }

        let built = BuiltProblem::get_or_build(&mut self.built, &self.curriculum, &self.options)?;

        let start = Instant::now();
        let verdict = self.backend.check(&built.problem);
        info!(
            "backend answered {} after {:?}",
            verdict.outcome(),
            start.elapsed()
        );
        if let Verdict::Unknown(reason) = &verdict {
            info!("generation inconclusive: {reason}");
        }

        let outcome = verdict.outcome();
        self.verdict = Some(verdict);
        Ok(outcome)
    }

    /// The satisfying valuation; `None` unless the last check was satisfiable.
    pub fn model(&self) -> Option<ScheduleModel<'_>> {
        let model = self.verdict.as_ref()?.model()?;
        let built = self.built.as_ref()?;

        Some(ScheduleModel::new(model, &built.sorts, &built.schedule))
    }

    /// Decode the timetables of all groups from the satisfying valuation.
    pub fn decode(&self) -> Result<Schedule, DecodeError> {
        self.model().ok_or(DecodeError::NotSatisfiable)?.decode()
    }

    /// The built problem, if [`Self::build`] or [`Self::check`] ran before.
    pub fn problem(&self) -> Option<&Problem> {
        self.built.as_ref().map(|built| &built.problem)
    }

    /// The outcome of the last check, if any.
    pub fn outcome(&self) -> Option<Outcome> {
        self.verdict.as_ref().map(Verdict::outcome)
    }

    pub fn quota(&self) -> &SlotItemTypeQuota {
        &self.quota
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[derive(Debug)]
struct BuiltProblem {
    problem: Problem,
    sorts: ScheduleSorts,
    schedule: ScheduleFunction,
}

impl BuiltProblem {
    fn get_or_build<'s>(
        slot: &'s mut Option<BuiltProblem>,
        curriculum: &Curriculum,
        options: &GeneratorOptions,
    ) -> Result<&'s BuiltProblem, BuildError> {
        let built = match slot.take() {
            Some(built) => built,
            None => BuiltProblem::build(curriculum, options)?,
        };

        Ok(slot.insert(built))
    }

    fn build(curriculum: &Curriculum, options: &GeneratorOptions) -> Result<Self, BuildError> {
        let start = Instant::now();
        let mut problem = Problem::default();

        let sorts = ScheduleSorts::declare(
            &mut problem,
            ConstantTable::from_ids(curriculum.subjects()),
            curriculum.rooms().clone(),
            ConstantTable::from_ids(curriculum.tutors()),
            curriculum.groups().clone(),
        );
        let schedule = ScheduleFunction::declare(&mut problem, &sorts);

        let groups = sorts.groups().ids();
        let loads = groups
            .iter()
            .map(|&group| curriculum.group_load(group))
            .collect::<Vec<_>>();
        let quotas = match options.quota_policy {
            QuotaPolicy::Aggregate => {
                vec![SlotItemTypeQuota::from_load(curriculum.load()); groups.len()]
            }
            QuotaPolicy::PerGroup => loads
                .iter()
                .map(|load| SlotItemTypeQuota::from_load(load))
                .collect(),
        };

        let formula = ScheduleAsserts::new(
            &problem,
            &sorts,
            &schedule,
            curriculum.eligibility(),
            options,
        )
        .valid_schedule(&loads, &quotas)?;
        problem.assert(formula);

        info!(
            "built the constraints for {} groups in {:?}",
            groups.len(),
            start.elapsed()
        );
        debug!(
            "{} boolean variables, {} enumerated variables, {} assertions",
            problem.num_bool_vars(),
            problem.enum_vars().len(),
            problem.assertions().len()
        );

        Ok(BuiltProblem {
            problem,
            sorts,
            schedule,
        })
    }
}
