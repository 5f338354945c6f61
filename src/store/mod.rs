//! SQLite-backed note store implementation.

mod connection;
mod error;
mod query;
mod schema;
mod write;


use rusqlite::Connection;

pub use error::{StoreError, StoreResult};
pub use query::SearchField;
pub use schema::{create_schema, get_schema_version};

// ===========================================
// NoteStore Struct
// ===========================================

/// SQLite-backed store for literature notes.
///
/// Owns the single database connection. The application opens one
/// store at startup, funnels every read and write through it, and
/// calls [`NoteStore::close`] on exit.
#[derive(Debug)]
pub struct NoteStore {
    pub(crate) conn: Connection,
}
