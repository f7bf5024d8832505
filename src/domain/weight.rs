//! Positive question weight.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A question's contribution to a test's total possible score.
///
/// Weights are positive integers with a minimum of 1.
///
/// # Examples
///
/// ```
/// use quizbank::domain::Weight;
///
/// let weight = Weight::new(3).unwrap();
/// assert_eq!(weight.get(), 3);
///
/// assert!(Weight::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Weight(u32);

impl Weight {
    /// The smallest allowed weight.
    pub const MIN: Weight = Weight(1);

    /// Creates a weight, rejecting anything below 1.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::WeightTooSmall(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::InvalidField {
                field: "weight",
                reason: format!("{value} is too large"),
            })
    }

    /// Returns the weight as an integer.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Weight {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidField {
                field: "weight",
                reason: format!("'{s}' is not a whole number"),
            })?;
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
