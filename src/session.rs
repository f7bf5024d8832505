//! Test-taking sessions.
//!
//! A session moves through `SelectingTest → Answering → Submitted` as
//! types: choosing a test id, holding a [`TestSession`], and holding the
//! [`Submission`] that `submit` returns. The session lives with the caller;
//! nothing is persisted until [`TestSession::submit`], so an abandoned
//! session leaves no trace in the result log.

use crate::domain::{Question, QuestionId, Test, TestId, TestResult};
use crate::grading::{GradeReport, TotalWeightPolicy, grade_answers};
use crate::store::{QuizRepository, StoreError, StoreResult};
use std::collections::HashMap;

/// A test that has been selected and is being answered.
#[derive(Debug, Clone)]
pub struct TestSession {
    test: Test,
    questions: Vec<Question>,
    answers: HashMap<QuestionId, String>,
}

/// What a submitted session produced.
#[derive(Debug, Clone)]
pub struct Submission {
    pub result: TestResult,
    pub report: GradeReport,
}

impl TestSession {
    /// Selects a test and loads its questions.
    pub fn start<R>(repo: &R, test_id: TestId) -> StoreResult<Self>
    where
        R: QuizRepository + ?Sized,
    {
        let test = repo
            .get_test(test_id)?
            .ok_or_else(|| StoreError::test_not_found(test_id))?;
        let questions = repo.test_questions(test_id)?;
        tracing::debug!(test_id = %test_id, questions = questions.len(), "session started");

        Ok(Self {
            test,
            questions,
            answers: HashMap::new(),
        })
    }

    pub fn test(&self) -> &Test {
        &self.test
    }

    /// The test's questions ordered by id.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Records an answer, replacing any earlier answer to the same question.
    ///
    /// Returns false and ignores the answer if the question is not part of
    /// this test.
    pub fn answer(&mut self, question_id: QuestionId, text: impl Into<String>) -> bool {
        if !self.test.contains(question_id) {
            return false;
        }
        self.answers.insert(question_id, text.into());
        true
    }

    /// Returns the answer recorded for a question, if any.
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    /// Number of questions answered so far.
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Grades the answers without recording anything.
    pub fn preview(&self, policy: TotalWeightPolicy) -> GradeReport {
        grade_answers(&self.questions, &self.answers, policy)
    }

    /// Grades the session and appends the grade to the result log.
    pub fn submit<R>(self, repo: &mut R, policy: TotalWeightPolicy) -> StoreResult<Submission>
    where
        R: QuizRepository + ?Sized,
    {
        let report = self.preview(policy);
        let result = repo.record_result(self.test.id(), report.grade)?;
        tracing::info!(
            test_id = %self.test.id(),
            obtained = report.obtained_weight,
            total = report.total_weight,
            grade = %report.grade,
            "session submitted"
        );
        Ok(Submission { result, report })
    }
}
