//! Take command handler.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

use super::with_store;
use crate::cli::TakeArgs;
use crate::domain::TestId;
use crate::grading::TotalWeightPolicy;
use crate::session::{Submission, TestSession};
use crate::store::QuizRepository;

pub fn handle_take(args: &TakeArgs, db_path: &Path, policy: TotalWeightPolicy) -> Result<()> {
    with_store(db_path, |store| {
        let stdin = io::stdin();
        take_test(
            store,
            args.id,
            policy,
            &mut stdin.lock(),
            &mut io::stdout().lock(),
        )?;
        Ok(())
    })
}

/// Asks every question of a test on `out`, reading one answer per line from
/// `input`, then grades and records the attempt.
///
/// A blank line leaves the question unanswered. End of input leaves the
/// remaining questions unanswered.
pub fn take_test<R, I, W>(
    repo: &mut R,
    test_id: TestId,
    policy: TotalWeightPolicy,
    input: &mut I,
    out: &mut W,
) -> Result<Submission>
where
    R: QuizRepository + ?Sized,
    I: BufRead,
    W: Write,
{
    let mut session = TestSession::start(&*repo, test_id)
        .with_context(|| format!("failed to start test {test_id}"))?;

    writeln!(out, "# {}", session.test().name())?;
    writeln!(out)?;

    let questions = session.questions().to_vec();
    let count = questions.len();
    for (index, question) in questions.iter().enumerate() {
        writeln!(
            out,
            "[{}/{}] {} (weight {})",
            index + 1,
            count,
            question.text(),
            question.weight()
        )?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let answer = line.trim_end_matches(['\n', '\r']);
        if !answer.is_empty() {
            session.answer(question.id(), answer);
        }
    }

    let submission = session
        .submit(repo, policy)
        .with_context(|| "failed to record result")?;
    let report = &submission.report;

    writeln!(out)?;
    writeln!(
        out,
        "Correct: {}/{} answered  Score: {}/{} ({:.0}%)",
        report.correct,
        report.answered,
        report.obtained_weight,
        report.total_weight,
        report.score * 100.0
    )?;
    writeln!(out, "Grade: {}", report.grade)?;
    Ok(submission)
}
