//! Write operations: inserting bibkeys, saving entries, renaming.

use super::NoteStore;
use super::query::lookup_id;
use crate::domain::{Bibkey, Entry, Genre, NoteId};
use crate::store::{StoreError, StoreResult};
use log::{debug, info};
use std::collections::BTreeSet;

impl NoteStore {
    // ===========================================
    // Insert
    // ===========================================

    /// Inserts a new bibkey as a blank entry and returns its id.
    ///
    /// The new row has every free-text field blank and the default
    /// genre; content arrives later through [`NoteStore::update_entry`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the bibkey is already taken.
    pub fn insert_new_bibkey(&mut self, bibkey: &Bibkey) -> StoreResult<NoteId> {
        let tx = self.transaction()?;

        if lookup_id(&tx, bibkey.as_str())?.is_some() {
            return Err(StoreError::Duplicate {
                bibkey: bibkey.to_string(),
            });
        }

        tx.execute(
            "INSERT INTO note (bibkey, genre) VALUES (?1, ?2)",
            rusqlite::params![bibkey.as_str(), Genre::default().as_str()],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;
        debug!("inserted new bibkey {} as note {}", bibkey, id);
        Ok(NoteId::from_raw(id))
    }

    // ===========================================
    // Update
    // ===========================================

    /// Saves an entry's content over its existing row.
    ///
    /// Every free-text field, the genre, the image links, and the tag
    /// set are written; the full-text index follows via triggers. The
    /// entry's bibkey is *not* written - renames go through
    /// [`NoteStore::rename_bibkey`], so a stale bibkey on the entry
    /// cannot clobber the stored one.
    ///
    /// Tags are reconciled against the stored set: missing rows are
    /// inserted and dropped rows deleted, which makes a repeated save
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the entry has no id or its
    /// id no longer names a row.
    pub fn update_entry(&mut self, entry: &Entry) -> StoreResult<()> {
        let id = entry.id().ok_or_else(|| StoreError::NotFound {
            key: entry.bibkey().to_string(),
        })?;

        let linkstr = entry
            .img_links()
            .iter()
            .map(|link| link.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let tx = self.transaction()?;

        let changed = tx.execute(
            "UPDATE note SET
                title = ?1,
                author = ?2,
                genre = ?3,
                thesis = ?4,
                hypothesis = ?5,
                method = ?6,
                finding = ?7,
                comment = ?8,
                img_linkstr = ?9
             WHERE id = ?10",
            rusqlite::params![
                entry.title(),
                entry.author(),
                entry.genre().as_str(),
                entry.thesis(),
                entry.hypothesis(),
                entry.method(),
                entry.finding(),
                entry.comment(),
                linkstr,
                id.as_i64(),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                key: entry.bibkey().to_string(),
            });
        }

        // Reconcile tag rows against the entry's tag set
        let stored: BTreeSet<String> = tx
            .prepare("SELECT tag FROM tags WHERE note_id = ?")?
            .query_map([id.as_i64()], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();
        let desired: BTreeSet<String> = entry
            .tags()
            .iter()
            .map(|tag| tag.as_str().to_string())
            .collect();

        for tag in desired.difference(&stored) {
            tx.execute(
                "INSERT INTO tags (note_id, tag) VALUES (?1, ?2)",
                rusqlite::params![id.as_i64(), tag],
            )?;
        }
        for tag in stored.difference(&desired) {
            tx.execute(
                "DELETE FROM tags WHERE note_id = ?1 AND tag = ?2",
                rusqlite::params![id.as_i64(), tag],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    // ===========================================
    // Rename
    // ===========================================

    /// Renames a bibkey, leaving the row id and everything keyed by
    /// it untouched.
    ///
    /// Renaming a key to itself is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `old` names no entry, and
    /// [`StoreError::Duplicate`] if `new` already names a different
    /// entry.
    pub fn rename_bibkey(&mut self, old: &Bibkey, new: &Bibkey) -> StoreResult<()> {
        let tx = self.transaction()?;

        let old_id = lookup_id(&tx, old.as_str())?.ok_or_else(|| StoreError::NotFound {
            key: old.to_string(),
        })?;

        if old == new {
            return Ok(());
        }

        if lookup_id(&tx, new.as_str())?.is_some() {
            return Err(StoreError::Duplicate {
                bibkey: new.to_string(),
            });
        }

        tx.execute(
            "UPDATE note SET bibkey = ?1 WHERE id = ?2",
            rusqlite::params![new.as_str(), old_id],
        )?;

        tx.commit()?;
        info!("renamed bibkey {} -> {}", old, new);
        Ok(())
    }
}
