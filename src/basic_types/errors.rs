use thiserror::Error;

use crate::domain::GroupId;
use crate::domain::LessonKind;
use crate::domain::SubjectId;
use crate::domain::TutorId;

/// Malformed input detected before any constraint is constructed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("required load {0} is not a non-negative multiple of 0.5")]
    InvalidLoad(f64),

    #[error(
        "tutor eligibility ({}, {subject}, {kind}) references a subject without a required load",
        .tutor.map_or_else(|| "no tutor".to_owned(), |tutor| tutor.to_string())
    )]
    UnknownSubject {
        tutor: Option<TutorId>,
        subject: SubjectId,
        kind: LessonKind,
    },

    #[error("a group specific load is given for {0}, which is not one of the scheduled groups")]
    UnknownGroup(GroupId),

    #[error(
        "the load of {subject}{} is given more than once",
        .group.map_or_else(String::new, |group| format!(" for {group}"))
    )]
    DuplicateLoad {
        group: Option<GroupId>,
        subject: SubjectId,
    },

    #[error("the daily run of lessons must satisfy 1 <= min ({min}) <= max ({max}) <= {slots}")]
    InvalidRunBounds { min: usize, max: usize, slots: usize },
}

/// A symbolic term of one sort was used where a term of another sort is required.
///
/// This indicates a programming error inside the constraint builder rather than bad input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("sort mismatch: expected a term of sort `{expected}`, found `{found}`")]
pub struct SortMismatchError {
    pub expected: String,
    pub found: String,
}

/// The constraint formula could not be constructed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    SortMismatch(#[from] SortMismatchError),
}

/// Decoding was requested for something the satisfying model does not describe.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no satisfying model is available; the last check was not satisfiable")]
    NotSatisfiable,

    #[error("{0} is not one of the scheduled groups")]
    UnknownGroup(GroupId),

    #[error("group index {index} is out of range for {groups} scheduled groups")]
    GroupOutOfRange { index: usize, groups: usize },

    #[error("day index {0} is out of range")]
    DayOutOfRange(usize),

    #[error("slot index {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("the model assigns the unconfigured value #{value} of sort `{sort}` to a filled lesson")]
    UnconfiguredValue { sort: String, value: usize },
}

/// Failure to load a curriculum or options file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}
