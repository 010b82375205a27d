use bookchain_crypto::{ChainLink, HashChainVerifier, HasherError};
use bookchain_types::{BlockHash, CheckoutRecord, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// One ledger entry, hash-linked to its predecessor.
///
/// `hash` is always the digest of the other four fields. Blocks handed out by
/// the ledger are clones; the committed copies are never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub position: u64,
    pub payload: CheckoutRecord,
    pub timestamp: Timestamp,
    pub hash: BlockHash,
    pub previous_hash: BlockHash,
}

impl Block {
    /// The synthetic first block: position 0, empty previous hash, marker payload.
    pub fn genesis() -> Result<Self, LedgerError> {
        Self::genesis_at(Timestamp::now())
    }

    pub fn genesis_at(timestamp: Timestamp) -> Result<Self, LedgerError> {
        Self::seal(0, CheckoutRecord::genesis(), timestamp, BlockHash::empty())
    }

    /// Build the successor of `previous` carrying `payload`, stamped now.
    pub fn create(payload: CheckoutRecord, previous: &Block) -> Result<Self, LedgerError> {
        Self::create_at(payload, previous, Timestamp::now())
    }

    /// Build the successor of `previous` with an explicit timestamp.
    ///
    /// Only the genesis payload may carry the genesis marker; it is cleared on
    /// every successor.
    pub fn create_at(
        mut payload: CheckoutRecord,
        previous: &Block,
        timestamp: Timestamp,
    ) -> Result<Self, LedgerError> {
        payload.is_genesis = false;
        Self::seal(
            previous.position + 1,
            payload,
            timestamp,
            previous.hash.clone(),
        )
    }

    fn seal(
        position: u64,
        payload: CheckoutRecord,
        timestamp: Timestamp,
        previous_hash: BlockHash,
    ) -> Result<Self, LedgerError> {
        let mut block = Self {
            position,
            payload,
            timestamp,
            hash: BlockHash::empty(),
            previous_hash,
        };
        block.hash = block.digest()?;
        Ok(block)
    }

    /// Recompute the content hash from position, timestamp, payload, and previous hash.
    ///
    /// The stored `hash` field is never an input.
    pub fn digest(&self) -> Result<BlockHash, LedgerError> {
        Ok(HashChainVerifier::compute_hash(self)?)
    }

    /// Returns `true` if the stored hash matches the recomputed digest.
    pub fn verify_hash(&self) -> Result<bool, LedgerError> {
        Ok(self.digest()? == self.hash)
    }

    pub fn is_genesis(&self) -> bool {
        self.position == 0 && self.previous_hash.is_empty()
    }
}

impl ChainLink for Block {
    fn position(&self) -> u64 {
        self.position
    }

    fn link_hash(&self) -> &BlockHash {
        &self.hash
    }

    fn previous_hash(&self) -> &BlockHash {
        &self.previous_hash
    }

    /// `position || timestamp || json(payload) || previous_hash`, no separators.
    fn content_bytes(&self) -> Result<Vec<u8>, HasherError> {
        let payload = serde_json::to_vec(&self.payload)
            .map_err(|e| HasherError::Serialization(e.to_string()))?;
        let position = self.position.to_string();

        let mut bytes = Vec::with_capacity(
            position.len()
                + self.timestamp.as_str().len()
                + payload.len()
                + self.previous_hash.as_str().len(),
        );
        bytes.extend_from_slice(position.as_bytes());
        bytes.extend_from_slice(self.timestamp.as_str().as_bytes());
        bytes.extend_from_slice(&payload);
        bytes.extend_from_slice(self.previous_hash.as_str().as_bytes());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookchain_crypto::ContentHasher;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn record() -> CheckoutRecord {
        CheckoutRecord::new("b1", "u1", "2024-01-01")
    }

    #[test]
    fn genesis_shape() {
        let g = Block::genesis().unwrap();
        assert_eq!(g.position, 0);
        assert!(g.previous_hash.is_empty());
        assert!(g.payload.is_genesis);
        assert!(g.is_genesis());
        assert_eq!(g.hash.as_str().len(), BlockHash::HEX_LEN);
        assert!(g.verify_hash().unwrap());
    }

    #[test]
    fn create_links_to_previous() {
        let g = Block::genesis().unwrap();
        let b = Block::create(record(), &g).unwrap();
        assert_eq!(b.position, 1);
        assert_eq!(b.previous_hash, g.hash);
        assert_eq!(b.payload, record());
        assert!(!b.is_genesis());
        assert!(b.verify_hash().unwrap());
    }

    #[test]
    fn successor_never_carries_genesis_marker() {
        let g = Block::genesis().unwrap();
        let forged = CheckoutRecord {
            is_genesis: true,
            ..record()
        };
        let b = Block::create(forged, &g).unwrap();
        assert!(!b.payload.is_genesis);
        assert_eq!(b.payload, record());
        assert!(b.verify_hash().unwrap());
    }

    #[test]
    fn digest_matches_documented_layout() {
        let g = Block::genesis_at(ts("2024-01-01T00:00:00.000000Z")).unwrap();
        let b = Block::create_at(record(), &g, ts("2024-01-01T00:00:01.000000Z")).unwrap();

        let expected = ContentHasher::block_hash(
            format!(
                "1{}{}{}",
                "2024-01-01T00:00:01.000000Z",
                r#"{"book_id":"b1","user_id":"u1","checkout_date":"2024-01-01","is_genesis":false}"#,
                g.hash
            )
            .as_bytes(),
        );
        assert_eq!(b.hash, expected);
    }

    #[test]
    fn digest_is_deterministic_for_identical_inputs() {
        let at = ts("2024-02-02T10:00:00.000000Z");
        let g = Block::genesis_at(at.clone()).unwrap();
        let a = Block::create_at(record(), &g, at.clone()).unwrap();
        let b = Block::create_at(record(), &g, at).unwrap();
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn digest_ignores_stored_hash() {
        let g = Block::genesis().unwrap();
        let mut b = Block::create(record(), &g).unwrap();
        let original = b.digest().unwrap();
        b.hash = BlockHash::from_digest([7; 32]);
        assert_eq!(b.digest().unwrap(), original);
        assert!(!b.verify_hash().unwrap());
    }

    #[test]
    fn every_field_feeds_the_digest() {
        let g = Block::genesis().unwrap();
        let b = Block::create(record(), &g).unwrap();

        let mut moved = b.clone();
        moved.position = 2;
        assert_ne!(moved.digest().unwrap(), b.hash);

        let mut retimed = b.clone();
        retimed.timestamp = ts("1999-12-31T23:59:59.000000Z");
        assert_ne!(retimed.digest().unwrap(), b.hash);

        let mut edited = b.clone();
        edited.payload.user_id = "mallory".into();
        assert_ne!(edited.digest().unwrap(), b.hash);

        let mut relinked = b.clone();
        relinked.previous_hash = BlockHash::from_digest([1; 32]);
        assert_ne!(relinked.digest().unwrap(), b.hash);
    }

    #[test]
    fn json_shape_and_hash_survive_parsing() {
        let g = Block::genesis().unwrap();
        let b = Block::create(record(), &g).unwrap();

        let value = serde_json::to_value(&b).unwrap();
        for key in ["position", "payload", "timestamp", "hash", "previous_hash"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }

        let text = serde_json::to_string_pretty(&b).unwrap();
        let parsed: Block = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.digest().unwrap(), b.hash);
    }
}
