//! Opening, closing, and write scoping for the note store.

use super::NoteStore;
use crate::store::{StoreError, StoreResult, create_schema};
use log::debug;
use rusqlite::{Connection, Transaction};
use std::fs;
use std::path::Path;

/// Creates the missing parents of `path`, reporting failures with the
/// directory that could not be created.
fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| StoreError::Io {
        path: parent.to_path_buf(),
        source: e,
    })
}

impl NoteStore {
    /// Pragma and schema setup shared by both constructors.
    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens the store at `path`.
    ///
    /// The database file, its parent directories, and the schema are
    /// created on first use; an existing database is left as it is.
    pub fn open(path: &Path) -> StoreResult<Self> {
        ensure_parent_dir(path)?;
        debug!("opening note store at {}", path.display());
        Self::bootstrap(Connection::open(path)?)
    }

    /// Opens a store backed by an in-memory database.
    ///
    /// Nothing survives the store itself; tests and scratch sessions
    /// use this.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Starts a transaction on the store's connection.
    ///
    /// The returned [`Transaction`] rolls back on drop unless
    /// [`Transaction::commit`] is called. Every multi-statement write in
    /// this crate runs inside one.
    pub fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Closes the store.
    ///
    /// Dropping the store closes the connection too; this method just
    /// surfaces any close-time error instead of swallowing it.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Storage(e))
    }
}
