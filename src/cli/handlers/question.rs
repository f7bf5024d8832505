//! Question bank command handlers.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use super::{truncate_str, with_store};
use crate::cli::output::{OutputFormat, QuestionListing, write_json};
use crate::cli::{ListArgs, QuestionAddArgs, QuestionRemoveArgs};
use crate::domain::{NewQuestion, Question, QuestionId};
use crate::store::QuizRepository;

pub fn handle_question_add(args: &QuestionAddArgs, db_path: &Path) -> Result<()> {
    with_store(db_path, |store| {
        add_question(store, args, &mut io::stdout().lock())?;
        Ok(())
    })
}

pub fn handle_question_list(args: &ListArgs, db_path: &Path) -> Result<()> {
    with_store(db_path, |store| {
        list_questions(store, args.format, &mut io::stdout().lock())
    })
}

pub fn handle_question_remove(args: &QuestionRemoveArgs, db_path: &Path) -> Result<()> {
    with_store(db_path, |store| {
        remove_question(store, args.id, &mut io::stdout().lock())
    })
}

/// Validates and stores a question, then reports its id.
pub(crate) fn add_question<R: QuizRepository + ?Sized>(
    repo: &mut R,
    args: &QuestionAddArgs,
    out: &mut impl Write,
) -> Result<Question> {
    let new = NewQuestion::new(&args.text, &args.answer, args.weight)?;
    let question = repo
        .add_question(&new)
        .with_context(|| "failed to add question")?;

    match args.format {
        OutputFormat::Human => writeln!(
            out,
            "Added question {} (weight {})",
            question.id(),
            question.weight()
        )?,
        OutputFormat::Json => write_json(out, QuestionListing::from(&question))?,
    }
    Ok(question)
}

pub(crate) fn list_questions<R: QuizRepository + ?Sized>(
    repo: &R,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let questions = repo
        .list_questions()
        .with_context(|| "failed to list questions")?;

    match format {
        OutputFormat::Human => {
            if questions.is_empty() {
                writeln!(out, "No questions found.")?;
                return Ok(());
            }
            writeln!(out, "{:>5}  {:<48}  {:<20}  {:>6}", "ID", "Question", "Answer", "Weight")?;
            writeln!(
                out,
                "{:>5}  {:<48}  {:<20}  {:>6}",
                "-----",
                "-".repeat(48),
                "-".repeat(20),
                "------"
            )?;
            for q in &questions {
                writeln!(
                    out,
                    "{:>5}  {:<48}  {:<20}  {:>6}",
                    q.id(),
                    truncate_str(q.text(), 48),
                    truncate_str(q.answer(), 20),
                    q.weight()
                )?;
            }
            writeln!(out)?;
            writeln!(out, "{} question(s)", questions.len())?;
        }
        OutputFormat::Json => {
            let listings: Vec<QuestionListing> =
                questions.iter().map(QuestionListing::from).collect();
            write_json(out, listings)?;
        }
    }
    Ok(())
}

pub(crate) fn remove_question<R: QuizRepository + ?Sized>(
    repo: &mut R,
    id: QuestionId,
    out: &mut impl Write,
) -> Result<()> {
    repo.remove_question(id)
        .with_context(|| format!("failed to delete question {id}"))?;
    writeln!(out, "Deleted question {id}")?;
    Ok(())
}
