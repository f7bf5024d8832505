//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::{QuestionId, TestId};
use output::OutputFormat;

/// quizbank - question bank, tests, and grading
#[derive(Parser, Debug)]
#[command(name = "quizbank", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.config/quizbank/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web interface
    Serve(ServeArgs),

    /// Manage the question bank
    #[command(subcommand)]
    Question(QuestionCommand),

    /// Compose and manage tests
    #[command(subcommand)]
    Test(TestCommand),

    /// Take a test interactively
    Take(TakeArgs),

    /// List the recorded grades of a test
    Results(ResultsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config file)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommand {
    /// Add a question to the bank
    Add(QuestionAddArgs),

    /// List all questions
    #[command(name = "ls")]
    List(ListArgs),

    /// Delete a question (removes it from every test)
    #[command(name = "rm")]
    Remove(QuestionRemoveArgs),
}

/// Arguments for `question add`
#[derive(Parser, Debug)]
pub struct QuestionAddArgs {
    /// Question text
    pub text: String,

    /// Correct answer (compared case-insensitively)
    pub answer: String,

    /// Weight of the question (at least 1)
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub weight: i64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for `question rm`
#[derive(Parser, Debug)]
pub struct QuestionRemoveArgs {
    /// Question ID
    pub id: QuestionId,
}

#[derive(Subcommand, Debug)]
pub enum TestCommand {
    /// Create a test from existing questions
    Create(TestCreateArgs),

    /// List all tests
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a test and its questions
    Show(TestShowArgs),

    /// Rename a test
    Rename(TestRenameArgs),

    /// Add questions to a test
    Add(TestQuestionsArgs),

    /// Remove questions from a test
    Remove(TestQuestionsArgs),

    /// Delete a test and its results
    #[command(name = "rm")]
    Delete(TestDeleteArgs),
}

/// Arguments for `test create`
#[derive(Parser, Debug)]
pub struct TestCreateArgs {
    /// Test name (must be unique)
    pub name: String,

    /// Question to include (can be specified multiple times)
    #[arg(short, long = "question", action = ArgAction::Append)]
    pub questions: Vec<QuestionId>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for `question ls` and `test ls`
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for `test show`
#[derive(Parser, Debug)]
pub struct TestShowArgs {
    /// Test ID
    pub id: TestId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for `test rename`
#[derive(Parser, Debug)]
pub struct TestRenameArgs {
    /// Test ID
    pub id: TestId,

    /// New name
    pub name: String,
}

/// Arguments for `test add` and `test remove`
#[derive(Parser, Debug)]
pub struct TestQuestionsArgs {
    /// Test ID
    pub id: TestId,

    /// Question ID (can be specified multiple times)
    #[arg(short, long = "question", action = ArgAction::Append, required = true)]
    pub questions: Vec<QuestionId>,
}

/// Arguments for `test rm`
#[derive(Parser, Debug)]
pub struct TestDeleteArgs {
    /// Test ID
    pub id: TestId,
}

/// Arguments for the `take` command
#[derive(Parser, Debug)]
pub struct TakeArgs {
    /// Test ID
    pub id: TestId,
}

/// Arguments for the `results` command
#[derive(Parser, Debug)]
pub struct ResultsArgs {
    /// Test ID
    pub id: TestId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
