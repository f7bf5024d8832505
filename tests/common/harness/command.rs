//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several suites
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `quizbank` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct QuizCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl QuizCommand {
    /// Creates a new command for the `quizbank` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--db` option.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Sets the `--config` option.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the command's stdin.
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("quizbank").expect("Failed to find quizbank binary");
        cmd.env_remove("RUST_LOG").args(&self.args);
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for `question add`.
    pub fn add_question(self, text: &str, answer: &str, weight: i64) -> Self {
        self.args([
            "question",
            "add",
            text,
            answer,
            "--weight",
            &weight.to_string(),
        ])
    }

    /// Configures for `question ls`.
    pub fn list_questions(self) -> Self {
        self.args(["question", "ls"])
    }

    /// Configures for `test create` with the given question ids.
    pub fn create_test(self, name: &str, questions: &[i64]) -> Self {
        let mut cmd = self.args(["test", "create", name]);
        for id in questions {
            cmd = cmd.args(["-q", &id.to_string()]);
        }
        cmd
    }

    /// Configures for `test ls`.
    pub fn list_tests(self) -> Self {
        self.args(["test", "ls"])
    }

    /// Configures for `test show`.
    pub fn show_test(self, id: i64) -> Self {
        self.args(["test", "show", &id.to_string()])
    }

    /// Configures for `take` with the given answers, one per line.
    pub fn take(self, id: i64, answers: &[&str]) -> Self {
        let mut input = answers.join("\n");
        input.push('\n');
        self.args(["take", &id.to_string()]).stdin(&input)
    }

    /// Configures for `results`.
    pub fn results(self, id: i64) -> Self {
        self.args(["results", &id.to_string()])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for QuizCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        QuizCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_db() {
        let temp = TempDir::new().unwrap();
        let cmd = QuizCommand::new().db(temp.path());
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], temp.path().to_string_lossy());
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = QuizCommand::new().create_test("Algebra", &[1, 2]).format_json();
        assert_eq!(
            cmd.get_args(),
            ["test", "create", "Algebra", "-q", "1", "-q", "2", "--format", "json"]
        );
    }
}
