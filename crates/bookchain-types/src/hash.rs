use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowercase hex encoding of a 256-bit digest.
///
/// The empty hash stands in for "no predecessor" on the genesis block. Every
/// other value is exactly 64 hex characters. The hash is stored as text because
/// it is hashed as text when the next block links to it.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHash(String);

impl BlockHash {
    /// Length in hex characters of a non-empty hash.
    pub const HEX_LEN: usize = 64;

    /// The empty hash (genesis predecessor).
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Build from raw digest bytes.
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    /// Returns `true` for the genesis predecessor hash.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for log lines.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(8);
        &self.0[..end]
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "BlockHash(<empty>)")
        } else {
            write!(f, "BlockHash({})", self.short())
        }
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BlockHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash() {
        let h = BlockHash::empty();
        assert!(h.is_empty());
        assert_eq!(h.as_str(), "");
        assert_eq!(h, BlockHash::default());
    }

    #[test]
    fn from_digest_is_lowercase_hex() {
        let h = BlockHash::from_digest([0xAB; 32]);
        assert_eq!(h.as_str().len(), BlockHash::HEX_LEN);
        assert!(h.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn short_handles_empty() {
        assert_eq!(BlockHash::empty().short(), "");
        assert_eq!(BlockHash::from_digest([0; 32]).short(), "00000000");
    }

    #[test]
    fn serializes_as_plain_string() {
        let h = BlockHash::from_digest([1; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", h.as_str()));
        let parsed: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, h);
    }
}
