//! Integer identities issued by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an identity from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id '{input}'")]
pub struct ParseIdError {
    kind: &'static str,
    input: String,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw row id.
            pub const fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw row id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|_| ParseIdError {
                    kind: $kind,
                    input: s.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Identity of a question in the question bank.
    QuestionId,
    "question"
);

define_id!(
    /// Identity of a test.
    TestId,
    "test"
);

define_id!(
    /// Identity of a recorded result.
    ResultId,
    "result"
);
