use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

macro_rules! entity_id {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// A study group; every group receives its own timetable.
    GroupId,
    "G"
);
entity_id!(
    /// A classroom.
    RoomId,
    "R"
);
entity_id!(
    /// A tutor who may teach some (subject, kind) combinations.
    TutorId,
    "T"
);
entity_id!(
    /// A subject of the curriculum.
    SubjectId,
    "S"
);
