//! QuizRepository trait and error types.

use crate::domain::{
    Grade, NewQuestion, NewTest, Question, QuestionId, Test, TestEdit, TestId, TestName,
    TestResult, ValidationError,
};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Kinds of record that can be looked up by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Question,
    Test,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Question => f.write_str("question"),
            Entity::Test => f.write_str("test"),
        }
    }
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied data violates an invariant. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced identity does not exist. Nothing was written.
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: i64 },

    /// A foreign-key constraint fired; an operation tried to leave a
    /// dangling reference.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// A stored value could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn question_not_found(id: QuestionId) -> Self {
        Self::NotFound {
            entity: Entity::Question,
            id: id.get(),
        }
    }

    pub fn test_not_found(id: TestId) -> Self {
        Self::NotFound {
            entity: Entity::Test,
            id: id.get(),
        }
    }

    /// Returns true for errors the end user can correct.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, msg) = &err
            && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        {
            let detail = msg
                .clone()
                .unwrap_or_else(|| "FOREIGN KEY constraint failed".to_string());
            return Self::Integrity(detail);
        }
        Self::Database(err)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// QuizRepository Trait
// ===========================================

/// Repository for questions, tests and results.
///
/// Every mutating method is atomic: it either applies all of its writes or
/// none of them.
pub trait QuizRepository {
    // Question store

    /// Stores a new question and returns it with its fresh identity.
    fn add_question(&mut self, question: &NewQuestion) -> StoreResult<Question>;

    /// Deletes a question and every association that references it.
    fn remove_question(&mut self, id: QuestionId) -> StoreResult<()>;

    /// Retrieves a single question by id.
    fn get_question(&self, id: QuestionId) -> StoreResult<Option<Question>>;

    /// Lists all questions ordered by id.
    fn list_questions(&self) -> StoreResult<Vec<Question>>;

    // Test composer

    /// Creates a test associated with exactly the given questions.
    ///
    /// Fails with a validation error if the name is taken and with
    /// `NotFound` if any question id does not resolve.
    fn create_test(&mut self, test: &NewTest) -> StoreResult<Test>;

    /// Retrieves a single test by id.
    fn get_test(&self, id: TestId) -> StoreResult<Option<Test>>;

    /// Lists all tests ordered by id.
    fn list_tests(&self) -> StoreResult<Vec<Test>>;

    /// Returns the questions of a test ordered by question id.
    fn test_questions(&self, id: TestId) -> StoreResult<Vec<Question>>;

    /// Applies a rename, additions and removals as one transaction.
    fn edit_test(&mut self, id: TestId, edit: &TestEdit) -> StoreResult<Test>;

    /// Renames a test. Renaming to the current name is a no-op.
    fn rename_test(&mut self, id: TestId, name: &TestName) -> StoreResult<Test> {
        self.edit_test(id, &TestEdit::rename(name.clone()))
    }

    /// Associates questions with a test; ids already present are skipped.
    fn add_questions(&mut self, id: TestId, question_ids: &[QuestionId]) -> StoreResult<Test> {
        self.edit_test(id, &TestEdit::add(question_ids.iter().copied()))
    }

    /// Dissociates questions from a test; absent ids are skipped.
    fn remove_questions(&mut self, id: TestId, question_ids: &[QuestionId]) -> StoreResult<Test> {
        self.edit_test(id, &TestEdit::remove(question_ids.iter().copied()))
    }

    /// Deletes a test's results, then its associations, then the test.
    fn delete_test(&mut self, id: TestId) -> StoreResult<()>;

    // Result log

    /// Appends a result for a test.
    fn record_result(&mut self, test_id: TestId, grade: Grade) -> StoreResult<TestResult>;

    /// Lists a test's results in creation order.
    fn results_for_test(&self, test_id: TestId) -> StoreResult<Vec<TestResult>>;

    /// Returns every test's results in creation order, keyed by test.
    ///
    /// Tests without results have no entry.
    fn results_by_test(&self) -> StoreResult<BTreeMap<TestId, Vec<TestResult>>>;
}
