//! ImageLink type: a bare filename referencing a stored image.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A reference to an image file inside the image directory.
///
/// Links are bare filenames like `3_b94d27b9934d3e08.png`; the image
/// directory they resolve against is configured separately. An entry
/// stores its links joined with commas in a single column, which is
/// why commas are rejected here.
///
/// # Validation Rules
/// - Non-empty after trimming
/// - No commas
/// - No path separators (`/` or `\`), and not `.` or `..`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageLink(String);

/// Error returned when parsing an invalid image link.
#[derive(Debug, Clone)]
pub struct ParseImageLinkError(String);

impl fmt::Display for ParseImageLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseImageLinkError {}

impl ImageLink {
    /// Creates a new ImageLink from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseImageLinkError` if the trimmed string is empty,
    /// contains a comma or path separator, or names a directory
    /// (`.` / `..`).
    pub fn new(s: &str) -> Result<Self, ParseImageLinkError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseImageLinkError(
                "image link cannot be empty".to_string(),
            ));
        }
        if trimmed.contains(',') {
            return Err(ParseImageLinkError(format!(
                "invalid image link '{}': links must not contain commas",
                trimmed
            )));
        }
        if trimmed.contains('/') || trimmed.contains('\\') || trimmed == "." || trimmed == ".." {
            return Err(ParseImageLinkError(format!(
                "invalid image link '{}': links must be bare file names",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the file name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ImageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageLink(\"{}\")", self.0)
    }
}

impl FromStr for ImageLink {
    type Err = ParseImageLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ImageLink {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ImageLink {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_with_valid_file_name() {
        let link = ImageLink::new("3_b94d27b9934d3e08.png").unwrap();
        assert_eq!(link.as_str(), "3_b94d27b9934d3e08.png");
    }

    #[test]
    fn new_trims_whitespace() {
        let link = ImageLink::new("  spectrum.png  ").unwrap();
        assert_eq!(link.as_str(), "spectrum.png");
    }

    #[test]
    fn new_rejects_empty_string() {
        assert!(ImageLink::new("").is_err());
        assert!(ImageLink::new("   ").is_err());
    }

    #[test]
    fn new_rejects_commas() {
        assert!(ImageLink::new("a.png,b.png").is_err());
    }

    #[test]
    fn new_rejects_path_separators() {
        assert!(ImageLink::new("img/a.png").is_err());
        assert!(ImageLink::new("..\\a.png").is_err());
    }

    #[test]
    fn new_rejects_directory_names() {
        assert!(ImageLink::new(".").is_err());
        assert!(ImageLink::new("..").is_err());
    }

    #[test]
    fn display_shows_file_name() {
        let link = ImageLink::new("spectrum.png").unwrap();
        assert_eq!(format!("{}", link), "spectrum.png");
    }

    #[test]
    fn debug_format() {
        let link = ImageLink::new("spectrum.png").unwrap();
        assert_eq!(format!("{:?}", link), "ImageLink(\"spectrum.png\")");
    }

    #[test]
    fn parse_via_fromstr() {
        let link: ImageLink = "spectrum.png".parse().unwrap();
        assert_eq!(link.as_str(), "spectrum.png");
    }

    #[test]
    fn serde_roundtrip() {
        let link = ImageLink::new("3_b94d27b9934d3e08.png").unwrap();
        let json = serde_json::to_string(&link).unwrap();
        let parsed: ImageLink = serde_json::from_str(&json).unwrap();
        assert_eq!(link, parsed);
    }

    #[test]
    fn serde_rejects_invalid_on_deserialize() {
        let result: Result<ImageLink, _> = serde_json::from_str("\"a,b\"");
        assert!(result.is_err());
    }
}
