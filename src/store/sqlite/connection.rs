//! Connection lifecycle for SqliteStore.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::store::{StoreError, StoreResult, create_schema};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

impl SqliteStore {
    /// Opens an in-memory database with the quiz schema.
    ///
    /// Used by tests and throwaway sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    /// Opens or creates a database at the given path.
    ///
    /// Creates parent directories if they don't exist and initializes the
    /// schema on a new database.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened quiz store");
        Self::init(conn)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Closes the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, err)| StoreError::from(err))
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begins a new transaction.
    ///
    /// The transaction rolls back on drop unless `commit()` is called.
    pub fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Transaction::new(&self.conn))
    }
}
