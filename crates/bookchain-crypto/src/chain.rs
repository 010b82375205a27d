use bookchain_types::BlockHash;

use crate::hasher::{ContentHasher, HasherError};

/// Trait for entries that participate in a hash chain.
pub trait ChainLink {
    /// Zero-based position in the chain.
    fn position(&self) -> u64;
    /// The entry's stored hash.
    fn link_hash(&self) -> &BlockHash;
    /// The previous entry's hash (empty for genesis).
    fn previous_hash(&self) -> &BlockHash;
    /// Canonical bytes the stored hash was computed over.
    fn content_bytes(&self) -> Result<Vec<u8>, HasherError>;
}

/// Hash chain integrity verifier.
///
/// Verifies that a sequence of entries forms a valid hash chain: the first
/// entry is a genesis at position 0 with no predecessor, each later entry
/// links to its predecessor's hash at the next position, and every stored
/// hash matches its recomputed content hash.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain, stopping at the first defect.
    pub fn verify_chain(links: &[impl ChainLink]) -> Result<(), ChainError> {
        let Some(genesis) = links.first() else {
            return Ok(());
        };

        if genesis.position() != 0 {
            return Err(ChainError::GenesisPosition {
                found: genesis.position(),
            });
        }
        if !genesis.previous_hash().is_empty() {
            return Err(ChainError::GenesisHasPrevHash);
        }
        Self::verify_link_hash(genesis)?;

        for pair in links.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.previous_hash() != prev.link_hash() {
                return Err(ChainError::BrokenLink {
                    position: next.position(),
                });
            }
            Self::verify_link_hash(next)?;
            let expected = prev.position() + 1;
            if next.position() != expected {
                return Err(ChainError::PositionGap {
                    expected,
                    found: next.position(),
                });
            }
        }

        Ok(())
    }

    /// Recompute the hash an entry should carry.
    pub fn compute_hash(link: &impl ChainLink) -> Result<BlockHash, HasherError> {
        Ok(ContentHasher::block_hash(&link.content_bytes()?))
    }

    fn verify_link_hash(link: &impl ChainLink) -> Result<(), ChainError> {
        let computed = Self::compute_hash(link)?;
        if &computed != link.link_hash() {
            return Err(ChainError::HashMismatch {
                position: link.position(),
            });
        }
        Ok(())
    }
}

/// Errors from chain verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("genesis entry has a previous hash (should be empty)")]
    GenesisHasPrevHash,

    #[error("genesis entry at position {found} (should be 0)")]
    GenesisPosition { found: u64 },

    #[error("broken link at position {position}: previous hash does not match")]
    BrokenLink { position: u64 },

    #[error("position gap: expected {expected}, found {found}")]
    PositionGap { expected: u64, found: u64 },

    #[error("hash mismatch at position {position}: computed hash differs from stored")]
    HashMismatch { position: u64 },

    #[error(transparent)]
    Encoding(#[from] HasherError),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test entry for chain verification.
    struct TestLink {
        position: u64,
        hash: BlockHash,
        prev: BlockHash,
        payload: Vec<u8>,
    }

    impl ChainLink for TestLink {
        fn position(&self) -> u64 {
            self.position
        }
        fn link_hash(&self) -> &BlockHash {
            &self.hash
        }
        fn previous_hash(&self) -> &BlockHash {
            &self.prev
        }
        fn content_bytes(&self) -> Result<Vec<u8>, HasherError> {
            let mut bytes = self.position.to_string().into_bytes();
            bytes.extend_from_slice(&self.payload);
            bytes.extend_from_slice(self.prev.as_str().as_bytes());
            Ok(bytes)
        }
    }

    fn seal(position: u64, payload: Vec<u8>, prev: BlockHash) -> TestLink {
        let mut link = TestLink {
            position,
            hash: BlockHash::empty(),
            prev,
            payload,
        };
        link.hash = HashChainVerifier::compute_hash(&link).unwrap();
        link
    }

    fn build_chain(count: u64) -> Vec<TestLink> {
        let mut chain: Vec<TestLink> = Vec::new();
        for i in 0..count {
            let prev = chain.last().map(|l| l.hash.clone()).unwrap_or_default();
            chain.push(seal(i, format!("entry-{i}").into_bytes(), prev));
        }
        chain
    }

    #[test]
    fn empty_chain_is_valid() {
        let chain: Vec<TestLink> = vec![];
        assert!(HashChainVerifier::verify_chain(&chain).is_ok());
    }

    #[test]
    fn single_entry_chain() {
        assert!(HashChainVerifier::verify_chain(&build_chain(1)).is_ok());
    }

    #[test]
    fn multi_entry_chain() {
        assert!(HashChainVerifier::verify_chain(&build_chain(10)).is_ok());
    }

    #[test]
    fn genesis_with_prev_hash_fails() {
        let chain = vec![seal(0, b"g".to_vec(), BlockHash::from_digest([1; 32]))];
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::GenesisHasPrevHash);
    }

    #[test]
    fn genesis_must_start_at_zero() {
        let chain = vec![seal(3, b"g".to_vec(), BlockHash::empty())];
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::GenesisPosition { found: 3 });
    }

    #[test]
    fn broken_link_detected() {
        let mut chain = build_chain(3);
        chain[2] = seal(2, b"entry-2".to_vec(), BlockHash::from_digest([99; 32]));
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { position: 2 });
    }

    #[test]
    fn position_gap_detected() {
        let mut chain = build_chain(2);
        let prev = chain[1].hash.clone();
        chain.push(seal(5, b"skip".to_vec(), prev));
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::PositionGap { expected: 2, found: 5 });
    }

    #[test]
    fn tampered_payload_detected() {
        let mut chain = build_chain(3);
        chain[1].payload = b"tampered".to_vec();
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::HashMismatch { position: 1 });
    }
}
