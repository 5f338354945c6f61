//! Genre type: the fixed classification of literature entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The coarse category of a literature entry.
///
/// The set is closed: the genre picker in the note editor offers
/// exactly these values and the store persists their display text.
/// New entries start out as [`Genre::Astronomy`], the first choice
/// in the picker.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genre {
    #[default]
    Astronomy,
    Code,
    Experiment,
    Instrum,
    Theory,
    Review,
}

/// Error returned when parsing an unknown genre.
#[derive(Debug, Clone)]
pub struct ParseGenreError(String);

impl fmt::Display for ParseGenreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown genre '{}': expected one of Astronomy, Code, Experiment, Instrum, Theory, Review",
            self.0
        )
    }
}

impl std::error::Error for ParseGenreError {}

impl Genre {
    /// All genres in picker order.
    pub const ALL: [Genre; 6] = [
        Genre::Astronomy,
        Genre::Code,
        Genre::Experiment,
        Genre::Instrum,
        Genre::Theory,
        Genre::Review,
    ];

    /// Returns the display text, which is also the stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Astronomy => "Astronomy",
            Genre::Code => "Code",
            Genre::Experiment => "Experiment",
            Genre::Instrum => "Instrum",
            Genre::Theory => "Theory",
            Genre::Review => "Review",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Genre({})", self.as_str())
    }
}

impl FromStr for Genre {
    type Err = ParseGenreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Astronomy" => Ok(Genre::Astronomy),
            "Code" => Ok(Genre::Code),
            "Experiment" => Ok(Genre::Experiment),
            "Instrum" => Ok(Genre::Instrum),
            "Theory" => Ok(Genre::Theory),
            "Review" => Ok(Genre::Review),
            other => Err(ParseGenreError(other.to_string())),
        }
    }
}

impl Serialize for Genre {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Genre {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
