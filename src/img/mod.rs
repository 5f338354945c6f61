//! Image attachments persisted as content-addressed PNG files.

mod cache_key;

pub use cache_key::CacheKey;

use crate::domain::{ImageLink, NoteId};
use log::debug;
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during image file operations.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ImageError {
    /// Creates an appropriate ImageError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => ImageError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => ImageError::PermissionDenied { path: path.into() },
            _ => ImageError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Stores image attachments as PNG files under one directory.
///
/// Filenames are derived from the owning note's id and a hash of the
/// image bytes, so pasting the same image twice lands on the same
/// file. The store holds no open handles between calls.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Opens the store rooted at `dir`, creating the directory if missing.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::PermissionDenied` or `ImageError::Io` if the
    /// directory cannot be created.
    pub fn open(dir: &Path) -> Result<Self, ImageError> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| ImageError::from_io(dir, e))?;
            debug!("created image directory {}", dir.display());
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the directory the store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the on-disk path behind a link.
    pub fn path_of(&self, link: &ImageLink) -> PathBuf {
        self.dir.join(link.as_str())
    }

    /// Saves image bytes for a note and returns the link.
    ///
    /// The filename is `{note_id}_{cache_key}.png`, so saving the same
    /// bytes for the same note again finds the file already on disk
    /// and leaves it untouched. New files are written via a temporary
    /// file and atomic rename to prevent partial writes.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::Io` if the temporary file cannot be written.
    /// Returns `ImageError::AtomicWrite` if the atomic rename fails.
    pub fn save(&self, note_id: NoteId, bytes: &[u8]) -> Result<ImageLink, ImageError> {
        let key = CacheKey::compute(bytes);
        let name = format!("{}_{}.png", note_id, key);
        let link = ImageLink::new(&name).expect("generated filename should be a valid link");

        let path = self.path_of(&link);
        if path.exists() {
            debug!("image {} already on disk, skipping write", link);
            return Ok(link);
        }

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| ImageError::Io {
            path: path.clone(),
            source: e,
        })?;

        temp.write_all(bytes).map_err(|e| ImageError::Io {
            path: path.clone(),
            source: e,
        })?;

        temp.persist(&path).map_err(|e| ImageError::AtomicWrite {
            path: path.clone(),
            source: e.error,
        })?;

        debug!("saved image {} ({} bytes)", link, bytes.len());
        Ok(link)
    }

    /// Loads the bytes behind a link.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::NotFound` if the file doesn't exist.
    /// Returns `ImageError::PermissionDenied` if access is denied.
    pub fn load(&self, link: &ImageLink) -> Result<Vec<u8>, ImageError> {
        let path = self.path_of(link);
        fs::read(&path).map_err(|e| ImageError::from_io(&path, e))
    }

    /// Deletes the file behind a link.
    ///
    /// A link with no backing file is not an error; the store treats
    /// the delete as already done.
    pub fn delete(&self, link: &ImageLink) -> Result<(), ImageError> {
        let path = self.path_of(link);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("deleted image {}", link);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageError::from_io(&path, e)),
        }
    }
}
