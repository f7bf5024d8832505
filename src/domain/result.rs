//! Recorded grades.

use super::{Grade, ResultId, TestId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The grade from one completed test-taking session.
///
/// Results are append-only: they are never updated, and are deleted only
/// when their test is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    id: ResultId,
    test_id: TestId,
    grade: Grade,
    taken_at: DateTime<Utc>,
}

impl TestResult {
    pub fn new(id: ResultId, test_id: TestId, grade: Grade, taken_at: DateTime<Utc>) -> Self {
        Self {
            id,
            test_id,
            grade,
            taken_at,
        }
    }

    pub fn id(&self) -> ResultId {
        self.id
    }

    pub fn test_id(&self) -> TestId {
        self.test_id
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// When the session was submitted.
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}
