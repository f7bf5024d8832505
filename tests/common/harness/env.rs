//! Isolated test environment with temp directory.

use super::QuizCommand;
use quizbank::domain::{NewQuestion, NewTest, QuestionId, TestId};
use quizbank::store::{QuizRepository, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Commands run against a database inside it and a config path that does
/// not exist, so the user's own configuration never leaks in.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the temp directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the database used by commands.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("quizbank.db")
    }

    /// Returns the config path passed to commands.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes a config file that commands will pick up.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Opens the database directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open store")
    }

    /// Adds a question directly through the library.
    pub fn add_question(&self, text: &str, answer: &str, weight: i64) -> QuestionId {
        let mut store = self.store();
        let question = NewQuestion::new(text, answer, weight).expect("Invalid question");
        store
            .add_question(&question)
            .expect("Failed to add question")
            .id()
    }

    /// Creates a test directly through the library.
    pub fn create_test(&self, name: &str, questions: &[QuestionId]) -> TestId {
        let mut store = self.store();
        let test = NewTest::new(name, questions.iter().copied()).expect("Invalid test");
        store.create_test(&test).expect("Failed to create test").id()
    }

    /// Creates a QuizCommand configured for this test environment.
    pub fn cmd(&self) -> QuizCommand {
        QuizCommand::new()
            .db(&self.db_path())
            .config(&self.config_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_db_inside_root() {
        let env = TestEnv::new();
        assert!(env.db_path().starts_with(env.root()));
        assert!(!env.config_path().exists());
    }

    #[test]
    fn test_env_seeds_database() {
        let env = TestEnv::new();
        let q = env.add_question("Q?", "A", 2);
        let t = env.create_test("Seeded", &[q]);

        let store = env.store();
        assert_eq!(store.test_questions(t).unwrap()[0].id(), q);
    }
}
