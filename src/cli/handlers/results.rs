//! Results command handler.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use super::with_store;
use crate::cli::ResultsArgs;
use crate::cli::output::{OutputFormat, ResultListing, write_json};
use crate::domain::TestId;
use crate::store::{QuizRepository, StoreError};

pub fn handle_results(args: &ResultsArgs, db_path: &Path) -> Result<()> {
    with_store(db_path, |store| {
        list_results(store, args.id, args.format, &mut io::stdout().lock())
    })
}

pub(crate) fn list_results<R: QuizRepository + ?Sized>(
    repo: &R,
    test_id: TestId,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let test = repo
        .get_test(test_id)?
        .ok_or_else(|| StoreError::test_not_found(test_id))?;
    let results = repo
        .results_for_test(test_id)
        .with_context(|| format!("failed to load results for test {test_id}"))?;

    match format {
        OutputFormat::Human => {
            if results.is_empty() {
                writeln!(out, "No results for '{}'.", test.name())?;
                return Ok(());
            }
            writeln!(out, "Results for '{}':", test.name())?;
            writeln!(out)?;
            for result in &results {
                writeln!(
                    out,
                    "  {}  grade {}",
                    result.taken_at().format("%Y-%m-%d %H:%M:%S"),
                    result.grade()
                )?;
            }
            writeln!(out)?;
            writeln!(out, "{} result(s)", results.len())?;
        }
        OutputFormat::Json => {
            let listings: Vec<ResultListing> = results.iter().map(ResultListing::from).collect();
            write_json(out, listings)?;
        }
    }
    Ok(())
}
