//! Questions in the question bank.

use super::{QuestionId, ValidationError, Weight};
use serde::Serialize;

/// A stored question with its canonical answer and weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    answer: String,
    weight: Weight,
}

impl Question {
    /// Creates a question from already-validated parts.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        answer: impl Into<String>,
        weight: Weight,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            answer: answer.into(),
            weight,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns true if `submitted` matches the stored answer.
    ///
    /// Matching is case-insensitive exact equality: both sides are
    /// lowercased and compared as-is, with no whitespace trimming.
    pub fn accepts(&self, submitted: &str) -> bool {
        submitted.to_lowercase() == self.answer.to_lowercase()
    }
}

/// A question that has passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    text: String,
    answer: String,
    weight: Weight,
}

impl NewQuestion {
    /// Validates question input.
    ///
    /// # Errors
    ///
    /// - `EmptyQuestionText` if `text` is empty
    /// - `EmptyAnswer` if `answer` is empty
    /// - `WeightTooSmall` if `weight < 1`
    pub fn new(text: &str, answer: &str, weight: i64) -> Result<Self, ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::EmptyQuestionText);
        }
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer);
        }
        let weight = Weight::new(weight)?;
        Ok(Self {
            text: text.to_string(),
            answer: answer.to_string(),
            weight,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}
