use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::basic_types::ConfigurationError;
use crate::basic_types::LoadError;
use crate::domain::SLOTS_PER_DAY;
use crate::encodings::LinearEncoding;

/// Where the week-wide slot item quota of every group is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuotaPolicy {
    /// One quota computed from the required load across all subjects, asserted identically for
    /// every group.
    #[default]
    Aggregate,
    /// Every group gets the quota of its own effective load.
    PerGroup,
}

/// Options which influence how the schedule constraints are built and lowered.
///
/// ```
/// use timetabler::generator::GeneratorOptions;
///
/// let options = GeneratorOptions::from_toml_str(
///     r#"
///     min_lessons_per_day = 1
///     linear_encoding = "sequential-sums"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(options.min_lessons_per_day, 1);
/// assert_eq!(options.max_lessons_per_day, 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// The shortest admissible run of lessons on a day which is not empty.
    pub min_lessons_per_day: usize,
    /// The longest admissible run of lessons on a day.
    pub max_lessons_per_day: usize,
    pub quota_policy: QuotaPolicy,
    pub linear_encoding: LinearEncoding,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            min_lessons_per_day: 2,
            max_lessons_per_day: 4,
            quota_policy: QuotaPolicy::default(),
            linear_encoding: LinearEncoding::default(),
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let min = self.min_lessons_per_day;
        let max = self.max_lessons_per_day;

        if min == 0 || min > max || max > SLOTS_PER_DAY {
            return Err(ConfigurationError::InvalidRunBounds {
                min,
                max,
                slots: SLOTS_PER_DAY,
            });
        }

        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate options from TOML; absent keys take their default.
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        let options: GeneratorOptions = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let options = GeneratorOptions::from_toml_str("").expect("valid options");

        assert_eq!(options, GeneratorOptions::default());
    }

    #[test]
    fn policies_are_kebab_case() {
        let options = GeneratorOptions::from_toml_str(r#"quota_policy = "per-group""#)
            .expect("valid options");

        assert_eq!(options.quota_policy, QuotaPolicy::PerGroup);
    }

    #[test]
    fn run_bounds_are_validated() {
        let error = GeneratorOptions::from_toml_str("min_lessons_per_day = 5")
            .expect_err("min exceeds max");

        assert!(matches!(
            error,
            LoadError::Configuration(ConfigurationError::InvalidRunBounds { min: 5, max: 4, .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            GeneratorOptions::from_toml_str("max_lessons = 3"),
            Err(LoadError::Toml(_))
        ));
    }
}
