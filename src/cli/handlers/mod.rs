//! Command handlers for the CLI.
//!
//! Each `handle_*` function opens the store, delegates to a function that
//! works against any [`QuizRepository`] and writer, then closes the store.

mod question;
mod results;
mod serve;
mod take;


use anyhow::{Context, Result};
use clap::CommandFactory;
use std::io;
use std::path::Path;

use crate::cli::{Cli, CompletionsArgs};
use crate::store::SqliteStore;

// Re-export public items
pub use question::{handle_question_add, handle_question_list, handle_question_remove};
pub use results::handle_results;
pub use serve::handle_serve;
pub use take::{handle_take, take_test};
pub use test::{
    handle_test_add, handle_test_create, handle_test_delete, handle_test_list,
    handle_test_remove, handle_test_rename, handle_test_show,
};

// Re-export for tests
#[cfg(test)]
pub(crate) use question::{add_question, list_questions, remove_question};
#[cfg(test)]
pub(crate) use results::list_results;
#[cfg(test)]
pub(crate) use test::{create_test, delete_test, edit_test, list_tests, show_test};

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "quizbank", &mut io::stdout());
    Ok(())
}

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the store at `db_path`, creating it if needed.
pub(crate) fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

/// Runs `f` against the store at `db_path` and closes it afterwards.
pub(crate) fn with_store<T>(
    db_path: &Path,
    f: impl FnOnce(&mut SqliteStore) -> Result<T>,
) -> Result<T> {
    let mut store = open_store(db_path)?;
    let value = f(&mut store)?;
    store.close().with_context(|| "failed to close database")?;
    Ok(value)
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
