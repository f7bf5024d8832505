//! Weighted scoring of submitted answers.
//!
//! Grading is a pure computation over a test's questions and the answers a
//! user submitted. Persisting the outcome is the caller's job.

use crate::domain::{Grade, Question, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which questions count toward the total possible weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalWeightPolicy {
    /// Only questions that received an answer count.
    #[default]
    #[serde(alias = "answered-only")]
    Answered,
    /// Every question in the test counts, answered or not.
    #[serde(alias = "all-questions")]
    All,
}

/// The outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    /// Sum of weights of correctly answered questions.
    pub obtained_weight: u64,
    /// Sum of weights that make up the denominator.
    pub total_weight: u64,
    /// Number of questions that received an answer.
    pub answered: usize,
    /// Number of correct answers.
    pub correct: usize,
    /// `obtained_weight / total_weight`, or 0 when the total is 0.
    pub score: f64,
    pub grade: Grade,
}

/// Grades `answers` against `questions`.
///
/// Each answered question is compared with [`Question::accepts`]. Answers
/// keyed by ids that are not among `questions` are ignored.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use quizbank::domain::{Question, QuestionId, Weight};
/// use quizbank::grading::{grade_answers, TotalWeightPolicy};
///
/// let q = Question::new(QuestionId::from_raw(1), "2 + 2?", "4", Weight::MIN);
/// let answers = HashMap::from([(q.id(), "4".to_string())]);
///
/// let report = grade_answers(&[q], &answers, TotalWeightPolicy::Answered);
/// assert_eq!(report.grade.value(), 5);
/// ```
pub fn grade_answers(
    questions: &[Question],
    answers: &HashMap<QuestionId, String>,
    policy: TotalWeightPolicy,
) -> GradeReport {
    let mut obtained_weight = 0u64;
    let mut total_weight = 0u64;
    let mut answered = 0;
    let mut correct = 0;

    for question in questions {
        let weight = u64::from(question.weight().get());
        match answers.get(&question.id()) {
            Some(submitted) => {
                answered += 1;
                total_weight += weight;
                if question.accepts(submitted) {
                    correct += 1;
                    obtained_weight += weight;
                }
            }
            None if policy == TotalWeightPolicy::All => total_weight += weight,
            None => {}
        }
    }

    let score = if total_weight > 0 {
        obtained_weight as f64 / total_weight as f64
    } else {
        0.0
    };

    GradeReport {
        obtained_weight,
        total_weight,
        answered,
        correct,
        score,
        grade: Grade::from_ratio(obtained_weight, total_weight),
    }
}
