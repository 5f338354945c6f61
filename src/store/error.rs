//! Error types for note store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during note store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entry does not exist.
    #[error("note not found: {key}")]
    NotFound { key: String },

    /// An insert or rename would reuse an existing bibkey.
    #[error("bibkey already exists: {bibkey}")]
    Duplicate { bibkey: String },

    /// A database operation failed.
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_includes_key() {
        let err = StoreError::NotFound {
            key: "Smith2020".to_string(),
        };
        assert_eq!(err.to_string(), "note not found: Smith2020");
    }

    #[test]
    fn duplicate_display_includes_bibkey() {
        let err = StoreError::Duplicate {
            bibkey: "Smith2020".to_string(),
        };
        assert_eq!(err.to_string(), "bibkey already exists: Smith2020");
    }

    #[test]
    fn storage_wraps_rusqlite_error() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.to_string().starts_with("database error:"));
    }

    #[test]
    fn io_display_includes_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/liternote.db"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/liternote.db"));
        assert!(msg.contains("denied"));
    }
}
