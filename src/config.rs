//! Fixed on-disk layout for the application's data.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the database file under the install root.
pub const DB_FILE: &str = "liternote.db";

/// Name of the image directory under the install root.
pub const IMG_DIR: &str = "img";

/// Resolves the fixed data layout under one install root.
///
/// The application keeps everything next to its executable: the
/// database file and a directory of image attachments. There are no
/// environment variables or flags; embedders and tests supply their
/// own root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    /// Creates the layout under the given root.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Creates the layout next to the running executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path cannot be resolved.
    pub fn from_exe_dir() -> io::Result<Self> {
        let exe = env::current_exe()?;
        let root = exe.parent().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "executable has no parent directory",
            )
        })?;
        Ok(Self::new(root))
    }

    /// Returns the install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the database file path.
    pub fn database(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    /// Returns the image directory path.
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(IMG_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_lives_directly_under_the_root() {
        let paths = StorePaths::new(Path::new("/opt/liternote"));
        assert_eq!(
            paths.database(),
            PathBuf::from("/opt/liternote/liternote.db")
        );
    }

    #[test]
    fn image_dir_lives_directly_under_the_root() {
        let paths = StorePaths::new(Path::new("/opt/liternote"));
        assert_eq!(paths.image_dir(), PathBuf::from("/opt/liternote/img"));
    }

    #[test]
    fn root_is_preserved() {
        let paths = StorePaths::new(Path::new("/opt/liternote"));
        assert_eq!(paths.root(), Path::new("/opt/liternote"));
    }

    #[test]
    fn relative_root_stays_relative() {
        let paths = StorePaths::new(Path::new("data"));
        assert_eq!(paths.database(), PathBuf::from("data/liternote.db"));
    }

    #[test]
    fn from_exe_dir_resolves_to_a_directory() {
        let paths = StorePaths::from_exe_dir().unwrap();
        assert!(paths.root().is_dir());
    }
}
