//! Read operations: lookups, pagination, and full-text search.

use super::NoteStore;
use crate::domain::{Bibkey, Entry, Genre, ImageLink, NoteId, Tag};
use crate::store::{StoreError, StoreResult};
use log::warn;
use rusqlite::Connection;
use std::fmt;

/// The scope of a full-text search.
///
/// `All` matches against every indexed field; the other variants
/// restrict the match to a single column of the full-text index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    All,
    Title,
    Author,
    Thesis,
    Hypothesis,
    Method,
    Finding,
    Comment,
}

impl SearchField {
    /// Returns the FTS column this field restricts to, or `None` for `All`.
    fn column(self) -> Option<&'static str> {
        match self {
            SearchField::All => None,
            SearchField::Title => Some("title"),
            SearchField::Author => Some("author"),
            SearchField::Thesis => Some("thesis"),
            SearchField::Hypothesis => Some("hypothesis"),
            SearchField::Method => Some("method"),
            SearchField::Finding => Some("finding"),
            SearchField::Comment => Some("comment"),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::All => "All",
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::Thesis => "Thesis",
            SearchField::Hypothesis => "Hypothesis",
            SearchField::Method => "Method",
            SearchField::Finding => "Finding",
            SearchField::Comment => "Comment",
        };
        write!(f, "{}", name)
    }
}

/// Resolves a bibkey to its raw row id, if the key exists.
pub(crate) fn lookup_id(conn: &Connection, bibkey: &str) -> StoreResult<Option<i64>> {
    match conn.query_row("SELECT id FROM note WHERE bibkey = ?", [bibkey], |row| {
        row.get::<_, i64>(0)
    }) {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StoreError::Storage(e)),
    }
}

/// Escapes LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Builds an FTS5 MATCH expression from free user text.
///
/// Each whitespace-separated token becomes a quoted phrase string, so
/// FTS5 operators and punctuation in the input are matched literally
/// instead of being parsed as query syntax. Tokens combine with
/// implicit AND. A non-`All` field wraps the tokens in a column
/// filter.
fn build_match_expr(field: SearchField, query: &str) -> String {
    let quoted: Vec<String> = query
        .split_whitespace()
        .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
        .collect();
    let tokens = quoted.join(" ");
    match field.column() {
        Some(column) => format!("{}: ({})", column, tokens),
        None => tokens,
    }
}

/// Parses raw key text fetched from the database, skipping any row
/// whose stored text the domain rejects.
fn collect_bibkeys(raw: Vec<String>) -> Vec<Bibkey> {
    let mut keys = Vec::new();
    for text in raw {
        match text.parse::<Bibkey>() {
            Ok(key) => keys.push(key),
            Err(e) => warn!("skipping malformed stored bibkey: {}", e),
        }
    }
    keys
}

impl NoteStore {
    // ===========================================
    // Single-Entry Lookups
    // ===========================================

    /// Resolves a bibkey to its note id, if the key exists.
    pub fn find_id_by_bibkey(&self, bibkey: &Bibkey) -> StoreResult<Option<NoteId>> {
        Ok(lookup_id(&self.conn, bibkey.as_str())?.map(NoteId::from_raw))
    }

    /// Fetches the full entry stored under a bibkey.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the bibkey names no entry.
    pub fn fetch_by_bibkey(&self, bibkey: &Bibkey) -> StoreResult<Entry> {
        let id = lookup_id(&self.conn, bibkey.as_str())?.ok_or_else(|| StoreError::NotFound {
            key: bibkey.to_string(),
        })?;
        self.fetch_by_id(id)?.ok_or_else(|| StoreError::NotFound {
            key: bibkey.to_string(),
        })
    }

    /// Fetches the most recently created entry, or `None` if the
    /// store is empty. The caller shows a blank editor in that case.
    pub fn fetch_most_recent(&self) -> StoreResult<Option<Entry>> {
        let id = match self
            .conn
            .query_row("SELECT id FROM note ORDER BY id DESC LIMIT 1", [], |row| {
                row.get::<_, i64>(0)
            }) {
            Ok(id) => id,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(StoreError::Storage(e)),
        };
        self.fetch_by_id(id)
    }

    fn fetch_by_id(&self, id: i64) -> StoreResult<Option<Entry>> {
        let mut stmt = self.conn.prepare(
            "SELECT bibkey, title, author, genre, thesis, hypothesis, method, finding, comment, img_linkstr
             FROM note WHERE id = ?",
        )?;

        let row = stmt.query_row([id], |row| {
            let bibkey = row.get::<_, String>(0)?.parse::<Bibkey>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            let genre = row.get::<_, String>(3)?.parse::<Genre>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok((
                bibkey,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                genre,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, String>(9)?,
            ))
        });

        let (bibkey, title, author, genre, thesis, hypothesis, method, finding, comment, linkstr) =
            match row {
                Ok(row) => row,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(StoreError::Storage(e)),
            };

        let mut img_links = Vec::new();
        for part in linkstr.split(',').filter(|part| !part.is_empty()) {
            match ImageLink::new(part) {
                Ok(link) => img_links.push(link),
                Err(e) => warn!("skipping malformed image link on note {}: {}", id, e),
            }
        }

        let names: Vec<String> = self
            .conn
            .prepare("SELECT tag FROM tags WHERE note_id = ? ORDER BY tag")?
            .query_map([id], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();
        let mut tags = Vec::new();
        for name in names {
            match Tag::new(&name) {
                Ok(tag) => tags.push(tag),
                Err(e) => warn!("skipping malformed tag on note {}: {}", id, e),
            }
        }

        let entry = Entry::builder(bibkey)
            .id(NoteId::from_raw(id))
            .title(title)
            .author(author)
            .genre(genre)
            .thesis(thesis)
            .hypothesis(hypothesis)
            .method(method)
            .finding(finding)
            .comment(comment)
            .img_links(img_links)
            .tags(tags)
            .build();

        Ok(Some(entry))
    }

    // ===========================================
    // Tag Listing
    // ===========================================

    /// Returns every distinct tag in the store, alphabetically.
    pub fn all_distinct_tags(&self) -> StoreResult<Vec<Tag>> {
        let names: Vec<String> = self
            .conn
            .prepare("SELECT DISTINCT tag FROM tags ORDER BY tag")?
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();

        let mut tags = Vec::new();
        for name in names {
            match Tag::new(&name) {
                Ok(tag) => tags.push(tag),
                Err(e) => warn!("skipping malformed stored tag: {}", e),
            }
        }
        Ok(tags)
    }

    // ===========================================
    // Bibkey Substring Search
    // ===========================================

    /// Returns one page of bibkeys containing `needle` as a substring,
    /// in ascending bibkey order.
    ///
    /// An empty needle matches every bibkey. Matching is ASCII
    /// case-insensitive, and LIKE wildcards in the needle match
    /// literally. Pages are 1-indexed; a page size or page number of
    /// zero is treated as one, and a page past the end comes back
    /// empty.
    pub fn search_bibkeys(
        &self,
        needle: &str,
        page_size: u32,
        page: u32,
    ) -> StoreResult<Vec<Bibkey>> {
        let page_size = i64::from(page_size.max(1));
        let page = i64::from(page.max(1));
        // Saturate so an absurd page number lands past the end instead
        // of wrapping the OFFSET negative.
        let offset = (page - 1).saturating_mul(page_size);
        let pattern = format!("%{}%", escape_like(needle));

        let raw: Vec<String> = self
            .conn
            .prepare(
                "SELECT bibkey FROM note WHERE bibkey LIKE ?1 ESCAPE '\\'
                 ORDER BY bibkey ASC LIMIT ?2 OFFSET ?3",
            )?
            .query_map(rusqlite::params![pattern, page_size, offset], |row| {
                row.get::<_, String>(0)
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(collect_bibkeys(raw))
    }

    // ===========================================
    // Full-Text Search
    // ===========================================

    /// Searches the full-text index and returns matching bibkeys in
    /// ascending order.
    ///
    /// `field` restricts the match to one indexed column; `genre`
    /// and `tags` narrow the result further (an entry qualifies if
    /// it carries *any* of the given tags). Whitespace-only queries
    /// return no results.
    pub fn search_fulltext(
        &self,
        field: SearchField,
        genre: Option<Genre>,
        query: &str,
        tags: &[Tag],
    ) -> StoreResult<Vec<Bibkey>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut sql = String::from(
            "SELECT DISTINCT n.bibkey FROM note n
             WHERE n.id IN (SELECT rowid FROM note_fts WHERE note_fts MATCH ?1)",
        );
        let mut params: Vec<String> = vec![build_match_expr(field, query)];

        if let Some(genre) = genre {
            params.push(genre.as_str().to_string());
            sql.push_str(&format!(" AND n.genre = ?{}", params.len()));
        }

        if !tags.is_empty() {
            let first = params.len() + 1;
            let placeholders: Vec<String> = (first..first + tags.len())
                .map(|i| format!("?{}", i))
                .collect();
            sql.push_str(&format!(
                " AND n.id IN (SELECT note_id FROM tags WHERE tag IN ({}))",
                placeholders.join(", ")
            ));
            params.extend(tags.iter().map(|tag| tag.as_str().to_string()));
        }

        sql.push_str(" ORDER BY n.bibkey ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let raw: Vec<String> = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                row.get::<_, String>(0)
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(collect_bibkeys(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ===========================================
    // LIKE Escaping
    // ===========================================

    #[test]
    fn escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("Smith2020"), "Smith2020");
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
    }

    #[test]
    fn escape_like_escapes_backslash_first() {
        assert_eq!(escape_like("a\\%"), "a\\\\\\%");
    }

    // ===========================================
    // MATCH Expression Building
    // ===========================================

    #[test]
    fn match_expr_quotes_single_token() {
        assert_eq!(build_match_expr(SearchField::All, "methanol"), "\"methanol\"");
    }

    #[test]
    fn match_expr_joins_tokens_with_implicit_and() {
        assert_eq!(
            build_match_expr(SearchField::All, "dark clouds"),
            "\"dark\" \"clouds\""
        );
    }

    #[test]
    fn match_expr_neutralizes_fts_operators() {
        assert_eq!(
            build_match_expr(SearchField::All, "dark OR clouds"),
            "\"dark\" \"OR\" \"clouds\""
        );
        assert_eq!(build_match_expr(SearchField::All, "fts(5)"), "\"fts(5)\"");
    }

    #[test]
    fn match_expr_doubles_embedded_quotes() {
        assert_eq!(
            build_match_expr(SearchField::All, "say \"hi\""),
            "\"say\" \"\"\"hi\"\"\""
        );
    }

    #[test]
    fn match_expr_applies_column_filter() {
        assert_eq!(
            build_match_expr(SearchField::Finding, "dark clouds"),
            "finding: (\"dark\" \"clouds\")"
        );
        assert_eq!(
            build_match_expr(SearchField::Title, "survey"),
            "title: (\"survey\")"
        );
    }

    #[test]
    fn search_field_display_matches_picker_text() {
        assert_eq!(SearchField::All.to_string(), "All");
        assert_eq!(SearchField::Hypothesis.to_string(), "Hypothesis");
    }

    #[test]
    fn search_field_default_is_all() {
        assert_eq!(SearchField::default(), SearchField::All);
    }
}
