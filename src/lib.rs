//! quizbank - question bank, tests, and weighted grading

pub mod cli;
pub mod domain;
pub mod grading;
pub mod session;
pub mod store;
pub mod web;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command, QuestionCommand, TestCommand,
    config::Config,
    handlers::{
        handle_completions, handle_question_add, handle_question_list, handle_question_remove,
        handle_results, handle_serve, handle_take, handle_test_add, handle_test_create,
        handle_test_delete, handle_test_list, handle_test_remove, handle_test_rename,
        handle_test_show,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, matches!(cli.command, Command::Serve(_)))?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let db_path = config.database_path(cli.db.as_ref());
    tracing::debug!(db = %db_path.display(), "resolved database path");

    match &cli.command {
        Command::Serve(args) => handle_serve(args, &db_path, &config),
        Command::Question(cmd) => match cmd {
            QuestionCommand::Add(args) => handle_question_add(args, &db_path),
            QuestionCommand::List(args) => handle_question_list(args, &db_path),
            QuestionCommand::Remove(args) => handle_question_remove(args, &db_path),
        },
        Command::Test(cmd) => match cmd {
            TestCommand::Create(args) => handle_test_create(args, &db_path),
            TestCommand::List(args) => handle_test_list(args, &db_path),
            TestCommand::Show(args) => handle_test_show(args, &db_path),
            TestCommand::Rename(args) => handle_test_rename(args, &db_path),
            TestCommand::Add(args) => handle_test_add(args, &db_path),
            TestCommand::Remove(args) => handle_test_remove(args, &db_path),
            TestCommand::Delete(args) => handle_test_delete(args, &db_path),
        },
        Command::Take(args) => handle_take(args, &db_path, config.grading.total_weight),
        Command::Results(args) => handle_results(args, &db_path),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins unless `-v` is given.
fn init_logging(verbose: u8, serving: bool) -> Result<()> {
    let level = match (verbose, serving) {
        (0, false) => "warn",
        (0, true) | (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    let directive = format!("quizbank={level}");

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));
    if verbose > 0 {
        filter = filter.add_directive(directive.parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
