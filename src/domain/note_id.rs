//! Row-id based note identifier with serde support.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The internal identifier of a note row.
///
/// Ids are allocated by the database when a bibkey is first inserted
/// and never change afterwards, while the bibkey itself may be
/// renamed. Everything that must survive a rename hangs off the id:
/// tag rows, the full-text index, and image filenames.
///
/// There is no public constructor; ids only enter the program through
/// store operations that read them back from the database.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(i64);

impl NoteId {
    pub(crate) fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw row id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn as_i64_returns_raw_value() {
        let id = NoteId::from_raw(42);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn display_shows_bare_number() {
        let id = NoteId::from_raw(7);
        assert_eq!(format!("{}", id), "7");
    }

    #[test]
    fn debug_format() {
        let id = NoteId::from_raw(7);
        assert_eq!(format!("{:?}", id), "NoteId(7)");
    }

    #[test]
    fn equality_and_hash_follow_raw_value() {
        let a = NoteId::from_raw(1);
        let b = NoteId::from_raw(1);
        let c = NoteId::from_raw(2);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordering_follows_insertion_order() {
        let earlier = NoteId::from_raw(3);
        let later = NoteId::from_raw(11);
        assert!(earlier < later);
    }

    #[test]
    fn serde_roundtrip_as_integer() {
        let id = NoteId::from_raw(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let parsed: NoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_in_struct_context() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Row {
            id: NoteId,
            bibkey: String,
        }

        let row = Row {
            id: NoteId::from_raw(3),
            bibkey: "Smith2020".to_string(),
        };

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"id\":3"));

        let parsed: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(row, parsed);
    }
}
