//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::domain::{Question, Test, TestResult};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single question in listing output.
#[derive(Debug, Serialize)]
pub struct QuestionListing {
    pub id: i64,
    pub text: String,
    pub answer: String,
    pub weight: u32,
}

impl From<&Question> for QuestionListing {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id().get(),
            text: q.text().to_string(),
            answer: q.answer().to_string(),
            weight: q.weight().get(),
        }
    }
}

/// A test in listing output.
#[derive(Debug, Serialize)]
pub struct TestListing {
    pub id: i64,
    pub name: String,
    pub questions: Vec<i64>,
}

impl From<&Test> for TestListing {
    fn from(t: &Test) -> Self {
        Self {
            id: t.id().get(),
            name: t.name().to_string(),
            questions: t.question_ids().iter().map(|id| id.get()).collect(),
        }
    }
}

/// A test with its full questions.
#[derive(Debug, Serialize)]
pub struct TestDetail {
    pub id: i64,
    pub name: String,
    pub questions: Vec<QuestionListing>,
    pub total_weight: u64,
}

/// A recorded result.
#[derive(Debug, Serialize)]
pub struct ResultListing {
    pub id: i64,
    pub grade: u8,
    pub taken_at: String,
}

impl From<&TestResult> for ResultListing {
    fn from(r: &TestResult) -> Self {
        Self {
            id: r.id().get(),
            grade: r.grade().value(),
            taken_at: r.taken_at().to_rfc3339(),
        }
    }
}

/// Writes `data` as pretty JSON wrapped in `{"data": ...}`.
pub fn write_json<T: Serialize>(out: &mut impl Write, data: T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(data))?)?;
    Ok(())
}
