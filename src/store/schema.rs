//! SQLite schema creation for the note store.

use rusqlite::Connection;

/// Creates the database schema for the note store.
///
/// This function creates all required tables, triggers, and indexes.
/// It is idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `note` - One row per reviewed paper
/// - `tags` - Tag rows keyed by (note_id, tag)
/// - `note_fts` - External-content FTS5 index over the text fields
/// - `schema_version` - Schema version tracking
///
/// The FTS index is kept in sync with `note` by three triggers, so
/// ordinary inserts, updates, and deletes never touch it directly.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // ===========================================
    // Note Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bibkey TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL DEFAULT '',
            author TEXT NOT NULL DEFAULT '',
            genre TEXT NOT NULL DEFAULT 'Astronomy',
            thesis TEXT NOT NULL DEFAULT '',
            hypothesis TEXT NOT NULL DEFAULT '',
            method TEXT NOT NULL DEFAULT '',
            finding TEXT NOT NULL DEFAULT '',
            comment TEXT NOT NULL DEFAULT '',
            img_linkstr TEXT NOT NULL DEFAULT ''
        );",
    )?;

    // ===========================================
    // Tags Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tags (
            note_id INTEGER NOT NULL REFERENCES note(id) ON DELETE CASCADE,
            tag TEXT NOT NULL,
            PRIMARY KEY (note_id, tag)
        );",
    )?;

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_tags_tag ON tags(tag);")?;

    // ===========================================
    // FTS5 Virtual Table
    // ===========================================
    // Column names must match the note table; the index reads row
    // content from it
    conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS note_fts USING fts5(
            title,
            author,
            thesis,
            hypothesis,
            method,
            finding,
            comment,
            content='note',
            content_rowid='id'
        );",
    )?;

    // ===========================================
    // FTS5 Sync Triggers
    // ===========================================
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS note_fts_insert
        AFTER INSERT ON note BEGIN
            INSERT INTO note_fts(rowid, title, author, thesis, hypothesis, method, finding, comment)
            VALUES (NEW.id, NEW.title, NEW.author, NEW.thesis, NEW.hypothesis, NEW.method, NEW.finding, NEW.comment);
        END;",
    )?;

    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS note_fts_delete
        AFTER DELETE ON note BEGIN
            INSERT INTO note_fts(note_fts, rowid, title, author, thesis, hypothesis, method, finding, comment)
            VALUES ('delete', OLD.id, OLD.title, OLD.author, OLD.thesis, OLD.hypothesis, OLD.method, OLD.finding, OLD.comment);
        END;",
    )?;

    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS note_fts_update
        AFTER UPDATE ON note BEGIN
            INSERT INTO note_fts(note_fts, rowid, title, author, thesis, hypothesis, method, finding, comment)
            VALUES ('delete', OLD.id, OLD.title, OLD.author, OLD.thesis, OLD.hypothesis, OLD.method, OLD.finding, OLD.comment);
            INSERT INTO note_fts(rowid, title, author, thesis, hypothesis, method, finding, comment)
            VALUES (NEW.id, NEW.title, NEW.author, NEW.thesis, NEW.hypothesis, NEW.method, NEW.finding, NEW.comment);
        END;",
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

    // Insert initial version if not exists
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (1, datetime('now'))",
        [],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
