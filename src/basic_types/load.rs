use std::fmt::Display;
use std::fmt::Formatter;
use std::iter::Sum;
use std::ops::Add;

use serde::Deserialize;
use serde::Serialize;

use super::ConfigurationError;

/// A weekly lesson count which is a non-negative multiple of one half.
///
/// The value is stored exactly as a number of half lessons, so comparisons never involve a
/// floating point tolerance. On the wire (TOML, JSON) it is a plain number such as `1.5`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Load {
    halves: u32,
}

impl Load {
    pub const ZERO: Load = Load { halves: 0 };

    pub const fn from_halves(halves: u32) -> Load {
        Load { halves }
    }

    /// `lessons` whole lessons; saturates at the largest representable load.
    pub const fn whole(lessons: u32) -> Load {
        Load {
            halves: lessons.saturating_mul(2),
        }
    }

    /// The number of half lessons.
    pub const fn halves(self) -> u32 {
        self.halves
    }

    /// The number of lessons which take place every week, i.e. `floor(self)`.
    pub const fn whole_lessons(self) -> u32 {
        self.halves / 2
    }

    /// Whether a lesson every other week remains after the whole lessons are taken.
    pub const fn has_half(self) -> bool {
        self.halves % 2 == 1
    }

    pub const fn is_zero(self) -> bool {
        self.halves == 0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.halves) / 2.0
    }
}

impl TryFrom<f64> for Load {
    type Error = ConfigurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;

        if !value.is_finite() || value < 0.0 || doubled.fract() != 0.0 || doubled > f64::from(u32::MAX) {
            return Err(ConfigurationError::InvalidLoad(value));
        }

        Ok(Load {
            halves: doubled as u32,
        })
    }
}

impl From<Load> for f64 {
    fn from(load: Load) -> Self {
        load.as_f64()
    }
}

/// Saturates at the largest representable load.
impl Add for Load {
    type Output = Load;

    fn add(self, rhs: Self) -> Self::Output {
        Load {
            halves: self.halves.saturating_add(rhs.halves),
        }
    }
}

impl Sum for Load {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Load::ZERO, Add::add)
    }
}

impl Display for Load {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.has_half() {
            write!(f, "{}.5", self.whole_lessons())
        } else {
            write!(f, "{}", self.whole_lessons())
        }
    }
}
