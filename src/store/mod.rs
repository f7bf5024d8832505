//! Persistent store: repository trait, schema, and the SQLite backend

mod repository;
mod schema;
mod sqlite;

pub use repository::{Entity, QuizRepository, StoreError, StoreResult};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};
