//! SQLite-backed quiz store implementation.

mod connection;
mod repo_impl;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed quiz store.
///
/// Owns the database connection. Open one at process start, pass it to
/// each operation, and close it at shutdown.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
