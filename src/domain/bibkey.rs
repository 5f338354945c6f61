//! Bibkey type: the user-facing citation key identifying an entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A citation key, e.g. `Smith2020` or `doe_review_2019a`.
///
/// Bibkeys identify entries everywhere a human reads or types them;
/// the numeric row id stays internal. Whitespace is trimmed and the
/// result must be non-empty. Renaming a bibkey never touches the row
/// id, so image files and tag rows keyed by id survive the rename.
///
/// # Examples
///
/// ```
/// use liternote::domain::Bibkey;
///
/// let key = Bibkey::new("  Smith2020 ").unwrap();
/// assert_eq!(key.as_str(), "Smith2020");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bibkey(String);

/// Error returned when parsing an invalid bibkey.
#[derive(Debug, Clone)]
pub struct ParseBibkeyError(String);

impl fmt::Display for ParseBibkeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseBibkeyError {}

impl Bibkey {
    /// Creates a new Bibkey from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseBibkeyError` if the trimmed string is empty.
    pub fn new(s: &str) -> Result<Self, ParseBibkeyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseBibkeyError("bibkey cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the bibkey as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bibkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Bibkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bibkey(\"{}\")", self.0)
    }
}

impl FromStr for Bibkey {
    type Err = ParseBibkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Bibkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Bibkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
