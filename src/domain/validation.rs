//! Validation errors raised at the boundary of the core.

use thiserror::Error;

/// Caller-supplied data that violates a domain invariant.
///
/// Validation errors are always recoverable: nothing has been written when
/// one is returned, and the message is suitable for showing to an end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Question text is empty.
    #[error("question text cannot be empty")]
    EmptyQuestionText,

    /// Answer text is empty.
    #[error("answer cannot be empty")]
    EmptyAnswer,

    /// Weight below the minimum of 1.
    #[error("weight must be at least 1, got {0}")]
    WeightTooSmall(i64),

    /// Test name is empty.
    #[error("test name cannot be empty")]
    EmptyTestName,

    /// Another test already uses this name.
    #[error("a test named '{0}' already exists")]
    DuplicateTestName(String),

    /// A test must start with at least one question.
    #[error("select at least one question for the test")]
    NoQuestionsSelected,

    /// Grade outside the 2..=5 range.
    #[error("grade must be between 2 and 5, got {0}")]
    GradeOutOfRange(i64),

    /// A field could not be parsed into its expected type.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A required field was not submitted.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}
