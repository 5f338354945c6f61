//! Cache key computation for content-addressed image filenames.

use sha2::{Digest, Sha256};
use std::fmt;

/// Short content hash used in image filenames.
///
/// Stores the first 16 hex characters of the SHA256 of the image
/// bytes. Two pastes of the same image produce the same key, so a
/// note never accumulates duplicate files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    hex: String,
}

impl CacheKey {
    /// Number of hex characters kept from the full SHA256 digest.
    const LEN: usize = 16;

    /// Computes the cache key of the given image bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hasher.finalize();
        let mut hex = format!("{:x}", digest);
        hex.truncate(Self::LEN);
        Self { hex }
    }

    /// Returns the key as a 16-character lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_from_empty_bytes() {
        let key = CacheKey::compute(&[]);
        assert_eq!(key.as_str(), "e3b0c44298fc1c14");
    }

    #[test]
    fn cache_key_from_known_content() {
        let key = CacheKey::compute(b"hello world");
        assert_eq!(key.as_str(), "b94d27b9934d3e08");
    }

    #[test]
    fn cache_key_display_shows_hex_string() {
        let key = CacheKey::compute(b"test");
        assert_eq!(format!("{}", key).len(), 16);
    }

    #[test]
    fn cache_key_equality_same_content() {
        let key1 = CacheKey::compute(b"same");
        let key2 = CacheKey::compute(b"same");
        assert_eq!(key1, key2);
    }

    #[test]
    fn cache_key_inequality_different_content() {
        let key1 = CacheKey::compute(b"first");
        let key2 = CacheKey::compute(b"second");
        assert_ne!(key1, key2);
    }
}
