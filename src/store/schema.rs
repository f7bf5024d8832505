//! SQLite schema creation for the quiz store.

use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the quiz store.
///
/// This function creates all required tables, indexes, and constraints.
/// It is idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `questions` - Question text, canonical answer and weight
/// - `tests` - Uniquely named tests
/// - `test_questions` - Many-to-many junction for tests and questions
/// - `results` - Append-only grades per completed test
/// - `schema_version` - Schema version tracking
///
/// Foreign keys carry no `ON DELETE` action. Deletions run their cascade
/// explicitly inside a transaction; a missed step trips the constraint.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // ===========================================
    // Questions Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL CHECK (length(text) > 0),
            answer TEXT NOT NULL CHECK (length(answer) > 0),
            weight INTEGER NOT NULL CHECK (weight >= 1)
        );",
    )?;

    // ===========================================
    // Tests Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE CHECK (length(name) > 0)
        );",
    )?;

    // ===========================================
    // Test-Questions Junction
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS test_questions (
            test_id INTEGER NOT NULL REFERENCES tests(id),
            question_id INTEGER NOT NULL REFERENCES questions(id),
            PRIMARY KEY (test_id, question_id)
        );",
    )?;

    // ===========================================
    // Results Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            test_id INTEGER NOT NULL REFERENCES tests(id),
            grade INTEGER NOT NULL CHECK (grade BETWEEN 2 AND 5),
            taken_at TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Indexes
    // ===========================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_test_questions_question ON test_questions(question_id);
         CREATE INDEX IF NOT EXISTS idx_results_test ON results(test_id);",
    )?;

    // ===========================================
    // Schema Version Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
