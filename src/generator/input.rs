use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;

use enumset::EnumSet;
use log::warn;
use serde::Deserialize;
use serde::Serialize;

use crate::basic_types::ConfigurationError;
use crate::basic_types::Load;
use crate::basic_types::LoadError;
use crate::domain::ConstantTable;
use crate::domain::GroupId;
use crate::domain::LessonKind;
use crate::domain::RoomId;
use crate::domain::SubjectId;
use crate::domain::TutorId;

/// The weekly number of lessons required for every subject and kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequiredLoad {
    loads: BTreeMap<SubjectId, [Load; 3]>,
}

impl RequiredLoad {
    pub fn set(&mut self, subject: SubjectId, kind: LessonKind, load: Load) {
        self.loads.entry(subject).or_default()[kind.index()] = load;
    }

    /// The required load; zero for subjects and kinds which were never set.
    pub fn get(&self, subject: SubjectId, kind: LessonKind) -> Load {
        self.loads
            .get(&subject)
            .map_or(Load::ZERO, |loads| loads[kind.index()])
    }

    pub fn contains(&self, subject: SubjectId) -> bool {
        self.loads.contains_key(&subject)
    }

    /// The subjects in increasing order.
    pub fn subjects(&self) -> impl Iterator<Item = SubjectId> + '_ {
        self.loads.keys().copied()
    }

    /// Every (subject, kind, load) entry, including zero loads of a known subject.
    pub fn entries(&self) -> impl Iterator<Item = (SubjectId, LessonKind, Load)> + '_ {
        self.loads.iter().flat_map(|(&subject, loads)| {
            LessonKind::ALL
                .into_iter()
                .map(move |kind| (subject, kind, loads[kind.index()]))
        })
    }

    pub fn total(&self) -> Load {
        self.entries().map(|(_, _, load)| load).sum()
    }
}

/// A (tutor, subject, kind) combination which may be taught. A `None` tutor allows the lesson to
/// take place without a tutor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Eligibility {
    #[serde(default)]
    pub tutor: Option<TutorId>,
    pub subject: SubjectId,
    pub kind: LessonKind,
}

impl Eligibility {
    pub fn new(tutor: Option<TutorId>, subject: SubjectId, kind: LessonKind) -> Eligibility {
        Eligibility {
            tutor,
            subject,
            kind,
        }
    }
}

/// The week-wide number of slot items of every shape which a group must have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SlotItemTypeQuota {
    /// `Single` items holding a lesson.
    pub single: u32,
    /// `Pair` items with both sides filled.
    pub pair: u32,
    /// `Pair` items with exactly one side filled.
    pub half: u32,
}

impl SlotItemTypeQuota {
    /// Every whole lesson of `load` needs a single; the half lessons are paired up two by two
    /// and an odd one out is left as a half pair. Counts saturate at `u32::MAX`.
    pub fn from_load(load: &RequiredLoad) -> SlotItemTypeQuota {
        let mut singles: u32 = 0;
        let mut halves: u32 = 0;

        for (_, _, load) in load.entries() {
            singles = singles.saturating_add(load.whole_lessons());
            if load.has_half() {
                halves = halves.saturating_add(1);
            }
        }

        SlotItemTypeQuota {
            single: singles,
            pair: halves / 2,
            half: halves % 2,
        }
    }

    /// The number of non-blank slot items the quota asks for, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.single
            .saturating_add(self.pair)
            .saturating_add(self.half)
    }
}

/// The validated input of one generation run.
#[derive(Clone, Debug)]
pub struct Curriculum {
    load: RequiredLoad,
    group_loads: BTreeMap<GroupId, RequiredLoad>,
    eligibility: BTreeSet<Eligibility>,
    rooms: ConstantTable<RoomId>,
    groups: ConstantTable<GroupId>,
}

impl Curriculum {
    /// Create a curriculum where every group has the same required load.
    pub fn new(
        load: RequiredLoad,
        eligibility: impl IntoIterator<Item = Eligibility>,
        rooms: impl IntoIterator<Item = RoomId>,
        groups: impl IntoIterator<Item = GroupId>,
    ) -> Result<Curriculum, ConfigurationError> {
        Curriculum::with_group_loads(load, BTreeMap::new(), eligibility, rooms, groups)
    }

    /// Create a curriculum where the groups in `group_loads` have their own required load
    /// instead of `load`.
    pub fn with_group_loads(
        load: RequiredLoad,
        group_loads: BTreeMap<GroupId, RequiredLoad>,
        eligibility: impl IntoIterator<Item = Eligibility>,
        rooms: impl IntoIterator<Item = RoomId>,
        groups: impl IntoIterator<Item = GroupId>,
    ) -> Result<Curriculum, ConfigurationError> {
        let curriculum = Curriculum {
            load,
            group_loads,
            eligibility: eligibility.into_iter().collect(),
            rooms: ConstantTable::from_ids(rooms),
            groups: ConstantTable::from_ids(groups),
        };

        curriculum.validate()?;
        curriculum.warn_about_untaught_loads();

        Ok(curriculum)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(&group) = self
            .group_loads
            .keys()
            .find(|&&group| self.groups.index_of(group).is_none())
        {
            return Err(ConfigurationError::UnknownGroup(group));
        }

        let subjects = self.subjects();
        if let Some(eligibility) = self
            .eligibility
            .iter()
            .find(|eligibility| !subjects.contains(&eligibility.subject))
        {
            return Err(ConfigurationError::UnknownSubject {
                tutor: eligibility.tutor,
                subject: eligibility.subject,
                kind: eligibility.kind,
            });
        }

        Ok(())
    }

    fn warn_about_untaught_loads(&self) {
        let mut taught: BTreeMap<SubjectId, EnumSet<LessonKind>> = BTreeMap::new();
        for eligibility in &self.eligibility {
            let _ = taught
                .entry(eligibility.subject)
                .or_default()
                .insert(eligibility.kind);
        }

        let loads = std::iter::once(&self.load).chain(self.group_loads.values());
        let required = loads
            .flat_map(RequiredLoad::entries)
            .filter(|(_, _, load)| !load.is_zero())
            .map(|(subject, kind, _)| (subject, kind))
            .collect::<BTreeSet<_>>();

        for (subject, kind) in required {
            let kinds = taught.get(&subject).copied().unwrap_or_default();
            if !kinds.contains(kind) {
                warn!("{subject} requires {kind} lessons but nobody is eligible to give them");
            }
        }
    }

    /// The base required load.
    pub fn load(&self) -> &RequiredLoad {
        &self.load
    }

    /// The effective required load of `group`.
    pub fn group_load(&self, group: GroupId) -> &RequiredLoad {
        self.group_loads.get(&group).unwrap_or(&self.load)
    }

    pub fn has_group_loads(&self) -> bool {
        !self.group_loads.is_empty()
    }

    /// Every subject with a required load, for any group, in increasing order.
    pub fn subjects(&self) -> BTreeSet<SubjectId> {
        std::iter::once(&self.load)
            .chain(self.group_loads.values())
            .flat_map(RequiredLoad::subjects)
            .collect()
    }

    /// The tutors of the eligibility set, in increasing order.
    pub fn tutors(&self) -> BTreeSet<TutorId> {
        self.eligibility
            .iter()
            .filter_map(|eligibility| eligibility.tutor)
            .collect()
    }

    pub fn eligibility(&self) -> &BTreeSet<Eligibility> {
        &self.eligibility
    }

    pub fn rooms(&self) -> &ConstantTable<RoomId> {
        &self.rooms
    }

    pub fn groups(&self) -> &ConstantTable<GroupId> {
        &self.groups
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a curriculum from TOML.
    ///
    /// ```
    /// use timetabler::generator::Curriculum;
    /// use timetabler::domain::GroupId;
    ///
    /// let curriculum = Curriculum::from_toml_str(
    ///     r#"
    ///     rooms = [1]
    ///     groups = [1, 2]
    ///
    ///     [[load]]
    ///     subject = 1
    ///     lecture = 1.5
    ///
    ///     [[tutor]]
    ///     tutor = 4
    ///     subject = 1
    ///     kind = "lecture"
    ///     "#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(curriculum.groups().ids(), &[GroupId(1), GroupId(2)]);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        let file: CurriculumFile = toml::from_str(s)?;

        let mut load = RequiredLoad::default();
        for entry in &file.load {
            entry.add_to(&mut load, None)?;
        }

        let mut group_loads: BTreeMap<GroupId, RequiredLoad> = BTreeMap::new();
        for entry in &file.group_load {
            let group_load = group_loads.entry(entry.group).or_default();
            entry.load.add_to(group_load, Some(entry.group))?;
        }

        let curriculum =
            Curriculum::with_group_loads(load, group_loads, file.tutor, file.rooms, file.groups)?;
        Ok(curriculum)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CurriculumFile {
    rooms: Vec<RoomId>,
    groups: Vec<GroupId>,
    #[serde(default)]
    load: Vec<LoadEntry>,
    #[serde(default)]
    tutor: Vec<Eligibility>,
    #[serde(default)]
    group_load: Vec<GroupLoadEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoadEntry {
    subject: SubjectId,
    #[serde(default)]
    lecture: Load,
    #[serde(default)]
    seminar: Load,
    #[serde(default)]
    lab: Load,
}

impl LoadEntry {
    /// Add the entry to `load`; every subject may be given once per load.
    fn add_to(
        &self,
        load: &mut RequiredLoad,
        group: Option<GroupId>,
    ) -> Result<(), ConfigurationError> {
        if load.contains(self.subject) {
            return Err(ConfigurationError::DuplicateLoad {
                group,
                subject: self.subject,
            });
        }

        load.set(self.subject, LessonKind::Lecture, self.lecture);
        load.set(self.subject, LessonKind::Seminar, self.seminar);
        load.set(self.subject, LessonKind::Lab, self.lab);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct GroupLoadEntry {
    group: GroupId,
    #[serde(flatten)]
    load: LoadEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(entries: &[(u32, LessonKind, f64)]) -> RequiredLoad {
        let mut load = RequiredLoad::default();
        for &(subject, kind, value) in entries {
            load.set(
                SubjectId(subject),
                kind,
                Load::try_from(value).expect("valid load"),
            );
        }
        load
    }

    #[test]
    fn quota_pairs_up_half_lessons() {
        let load = load(&[
            (1, LessonKind::Lecture, 1.5),
            (1, LessonKind::Seminar, 0.5),
            (2, LessonKind::Lab, 2.5),
            (3, LessonKind::Lecture, 2.0),
        ]);

        let quota = SlotItemTypeQuota::from_load(&load);

        assert_eq!(
            quota,
            SlotItemTypeQuota {
                single: 5,
                pair: 1,
                half: 1,
            }
        );
        assert_eq!(quota.total(), 7);
    }

    #[test]
    fn missing_entries_have_zero_load() {
        let load = load(&[(1, LessonKind::Lecture, 1.0)]);

        assert_eq!(load.get(SubjectId(1), LessonKind::Lab), Load::ZERO);
        assert_eq!(load.get(SubjectId(2), LessonKind::Lecture), Load::ZERO);
        assert_eq!(load.total(), Load::whole(1));
    }

    #[test]
    fn eligibility_of_unknown_subject_is_rejected() {
        let result = Curriculum::new(
            load(&[(1, LessonKind::Lecture, 1.0)]),
            [Eligibility::new(Some(TutorId(1)), SubjectId(2), LessonKind::Lab)],
            [RoomId(1)],
            [GroupId(1)],
        );

        assert_eq!(
            result.map(|_| ()),
            Err(ConfigurationError::UnknownSubject {
                tutor: Some(TutorId(1)),
                subject: SubjectId(2),
                kind: LessonKind::Lab,
            })
        );
    }

    #[test]
    fn group_loads_must_name_scheduled_groups() {
        let result = Curriculum::with_group_loads(
            RequiredLoad::default(),
            BTreeMap::from([(GroupId(9), RequiredLoad::default())]),
            Vec::<Eligibility>::new(),
            [RoomId(1)],
            [GroupId(1)],
        );

        assert_eq!(result.map(|_| ()), Err(ConfigurationError::UnknownGroup(GroupId(9))));
    }

    #[test]
    fn repeated_identifiers_are_interned_once() {
        let curriculum = Curriculum::new(
            RequiredLoad::default(),
            Vec::<Eligibility>::new(),
            [RoomId(2), RoomId(1), RoomId(2)],
            [GroupId(1), GroupId(1)],
        )
        .expect("valid curriculum");

        assert_eq!(curriculum.rooms().ids(), &[RoomId(2), RoomId(1)]);
        assert_eq!(curriculum.groups().len(), 1);
    }

    #[test]
    fn curriculum_file_with_group_overrides() {
        let curriculum = Curriculum::from_toml_str(
            r#"
            rooms = [1, 2]
            groups = [1, 2]

            [[load]]
            subject = 1
            lecture = 1
            seminar = 0.5

            [[tutor]]
            tutor = 3
            subject = 1
            kind = "seminar"

            [[tutor]]
            subject = 1
            kind = "lecture"

            [[group_load]]
            group = 2
            subject = 1
            lab = 2
            "#,
        )
        .expect("valid curriculum");

        assert_eq!(
            curriculum.group_load(GroupId(1)).get(SubjectId(1), LessonKind::Seminar),
            Load::from_halves(1)
        );
        assert_eq!(
            curriculum.group_load(GroupId(2)).get(SubjectId(1), LessonKind::Lab),
            Load::whole(2)
        );
        assert_eq!(
            curriculum.group_load(GroupId(2)).get(SubjectId(1), LessonKind::Lecture),
            Load::ZERO
        );
        assert!(curriculum
            .eligibility()
            .contains(&Eligibility::new(None, SubjectId(1), LessonKind::Lecture)));
        assert_eq!(curriculum.tutors().into_iter().collect::<Vec<_>>(), vec![TutorId(3)]);
    }

    #[test]
    fn fractional_loads_are_rejected() {
        let result = Curriculum::from_toml_str(
            r#"
            rooms = []
            groups = []

            [[load]]
            subject = 1
            lab = 0.3
            "#,
        );

        assert!(matches!(result, Err(LoadError::Toml(_))));
    }

    #[test]
    fn quota_of_huge_loads_saturates() {
        let load = load(&[
            (1, LessonKind::Lecture, 2.0e9),
            (2, LessonKind::Lecture, 2.0e9),
            (3, LessonKind::Lecture, 2.0e9),
            (3, LessonKind::Seminar, 0.5),
        ]);

        let quota = SlotItemTypeQuota::from_load(&load);

        assert_eq!(quota.single, u32::MAX);
        assert_eq!(quota.total(), u32::MAX);
        assert_eq!(load.total(), Load::from_halves(u32::MAX));
    }

    #[test]
    fn repeated_subject_in_load_is_rejected() {
        let result = Curriculum::from_toml_str(
            r#"
            rooms = [1]
            groups = [1]

            [[load]]
            subject = 1
            lecture = 2

            [[load]]
            subject = 1
            seminar = 1
            "#,
        );

        assert!(matches!(
            result,
            Err(LoadError::Configuration(ConfigurationError::DuplicateLoad {
                group: None,
                subject: SubjectId(1),
            }))
        ));
    }

    #[test]
    fn repeated_subject_in_group_load_is_rejected() {
        let result = Curriculum::from_toml_str(
            r#"
            rooms = [1]
            groups = [1, 2]

            [[load]]
            subject = 1
            lecture = 1

            [[group_load]]
            group = 2
            subject = 1
            lab = 1

            [[group_load]]
            group = 1
            subject = 1
            lab = 1

            [[group_load]]
            group = 2
            subject = 1
            seminar = 1
            "#,
        );

        assert!(matches!(
            result,
            Err(LoadError::Configuration(ConfigurationError::DuplicateLoad {
                group: Some(GroupId(2)),
                subject: SubjectId(1),
            }))
        ));
    }

    #[test]
    fn duplicate_load_names_the_group() {
        let error = ConfigurationError::DuplicateLoad {
            group: Some(GroupId(2)),
            subject: SubjectId(1),
        };

        assert_eq!(error.to_string(), "the load of S1 for G2 is given more than once");
    }
}
