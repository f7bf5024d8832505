//! Letter-style numeric grade derived from a score.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A grade in the range 2..=5.
///
/// Scores map onto grades through closed-open buckets:
///
/// | score            | grade |
/// |------------------|-------|
/// | `< 0.5`          | 2     |
/// | `0.5 ..< 0.7`    | 3     |
/// | `0.7 ..< 0.9`    | 4     |
/// | `>= 0.9`         | 5     |
///
/// # Examples
///
/// ```
/// use quizbank::domain::Grade;
///
/// assert_eq!(Grade::from_score(0.7).value(), 4);
/// assert_eq!(Grade::from_score(0.0), Grade::LOWEST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    /// Failing grade.
    pub const LOWEST: Grade = Grade(2);
    /// Best grade.
    pub const HIGHEST: Grade = Grade(5);

    /// Creates a grade from a stored integer.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        match value {
            2..=5 => Ok(Self(value as u8)),
            _ => Err(ValidationError::GradeOutOfRange(value)),
        }
    }

    /// Maps a score in `[0, 1]` to its grade bucket.
    ///
    /// NaN is treated as a zero score.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self(5)
        } else if score >= 0.7 {
            Self(4)
        } else if score >= 0.5 {
            Self(3)
        } else {
            Self(2)
        }
    }

    /// Maps `obtained / total` to a grade using exact integer comparison.
    ///
    /// A zero total scores as 0.
    pub fn from_ratio(obtained: u64, total: u64) -> Self {
        if total == 0 {
            return Self::LOWEST;
        }
        // score >= n/10  <=>  10 * obtained >= n * total
        let scaled = u128::from(obtained) * 10;
        let total = u128::from(total);
        if scaled >= total * 9 {
            Self(5)
        } else if scaled >= total * 7 {
            Self(4)
        } else if scaled >= total * 5 {
            Self(3)
        } else {
            Self(2)
        }
    }

    /// Returns the grade as an integer.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
