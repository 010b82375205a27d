use bookchain_types::BlockHash;
use sha2::{Digest, Sha256};

/// SHA-256 content hasher.
///
/// Inputs are hashed exactly as given, with no domain tag, so digests match
/// any other SHA-256 implementation fed the same bytes.
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    /// Hash the concatenation of several byte slices without separators.
    pub fn hash_parts(parts: &[&[u8]]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }

    /// Lowercase hex digest of the concatenated parts.
    pub fn hash_hex(parts: &[&[u8]]) -> String {
        hex::encode(Self::hash_parts(parts))
    }

    /// Digest of raw bytes as a [`BlockHash`].
    pub fn block_hash(data: &[u8]) -> BlockHash {
        BlockHash::from_digest(Self::hash(data))
    }
}

/// Errors from hashing operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        assert_eq!(ContentHasher::hash(data), ContentHasher::hash(data));
    }

    #[test]
    fn known_sha256_vector() {
        assert_eq!(
            ContentHasher::hash_hex(&[b"abc"]),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_parts_equals_hash_of_concatenation() {
        let joined = ContentHasher::hash(b"1232024-01-01");
        let parts = ContentHasher::hash_parts(&[b"123", b"2024-01-01"]);
        assert_eq!(joined, parts);
    }

    #[test]
    fn block_hash_matches_raw_digest() {
        let data = b"original";
        assert_eq!(
            ContentHasher::block_hash(data),
            BlockHash::from_digest(ContentHasher::hash(data))
        );
        assert_ne!(ContentHasher::block_hash(data), ContentHasher::block_hash(b"tampered"));
    }

    #[test]
    fn hex_is_lowercase_64_chars() {
        let hex = ContentHasher::hash_hex(&[b"any", b"thing"]);
        assert_eq!(hex.len(), 64);
        assert_eq!(hex, hex.to_lowercase());
    }
}
