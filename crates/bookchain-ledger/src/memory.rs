use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bookchain_crypto::HashChainVerifier;
use bookchain_types::{BlockHash, CheckoutRecord};
use serde::Serialize;
use tracing::{debug, warn};

use crate::block::Block;
use crate::error::LedgerError;
use crate::sink::{CommitSink, NoOpSink};
use crate::traits::{AppendOutcome, LedgerReader, LedgerWriter};
use crate::validation::{ChainValidator, ValidationReport};

/// In-memory checkout ledger.
///
/// The chain lives behind an `RwLock`. Appends hold the write lock across
/// "read tip, build candidate, validate, commit", so two concurrent appends
/// can never both extend the same tip. Readers take the read lock and clone,
/// so they never see a half-committed block.
pub struct InMemoryLedger {
    blocks: RwLock<Vec<Block>>,
    sink: Box<dyn CommitSink>,
}

/// Length and tip of a chain at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainSummary {
    pub length: usize,
    pub tip_position: u64,
    pub tip_hash: BlockHash,
}

impl InMemoryLedger {
    /// Create a ledger holding only a fresh genesis block.
    pub fn initialize() -> Result<Self, LedgerError> {
        Self::with_sink(NoOpSink)
    }

    /// Create a ledger that reports every commit to `sink`.
    pub fn with_sink(sink: impl CommitSink + 'static) -> Result<Self, LedgerError> {
        let genesis = Block::genesis()?;
        debug!(hash = %genesis.hash.short(), "genesis block created");
        Ok(Self {
            blocks: RwLock::new(vec![genesis]),
            sink: Box::new(sink),
        })
    }

    pub fn summary(&self) -> Result<ChainSummary, LedgerError> {
        let blocks = self.read()?;
        let tip = blocks.last().ok_or(LedgerError::EmptyChain)?;
        Ok(ChainSummary {
            length: blocks.len(),
            tip_position: tip.position,
            tip_hash: tip.hash.clone(),
        })
    }

    /// Re-verify every committed block, failing on the first defect.
    pub fn verify_integrity(&self) -> Result<(), LedgerError> {
        let blocks = self.read()?;
        HashChainVerifier::verify_chain(blocks.as_slice())?;
        Ok(())
    }

    /// Audit the committed chain, collecting every violation.
    pub fn validation_report(&self) -> Result<ValidationReport, LedgerError> {
        let blocks = self.read()?;
        Ok(ChainValidator::validate_chain(blocks.as_slice()))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Block>>, LedgerError> {
        self.blocks
            .read()
            .map_err(|_| LedgerError::LockPoisoned("read"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Block>>, LedgerError> {
        self.blocks
            .write()
            .map_err(|_| LedgerError::LockPoisoned("write"))
    }

    /// Validate `candidate` against the tip and push it. Caller holds the write lock.
    fn commit_candidate(
        &self,
        blocks: &mut Vec<Block>,
        candidate: Block,
    ) -> Result<AppendOutcome, LedgerError> {
        let tip = blocks.last().ok_or(LedgerError::EmptyChain)?;

        if let Err(reason) = ChainValidator::validate_successor(&candidate, tip) {
            warn!(
                position = candidate.position,
                tip = tip.position,
                reason = reason.as_str(),
                "candidate block rejected"
            );
            return Ok(AppendOutcome::Rejected(reason));
        }

        blocks.push(candidate.clone());
        if let Err(e) = self.sink.on_commit(&candidate) {
            warn!(position = candidate.position, error = %e, "commit sink failed");
        }
        Ok(AppendOutcome::Committed(candidate))
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&self, payload: CheckoutRecord) -> Result<AppendOutcome, LedgerError> {
        let mut blocks = self.write()?;
        let tip = blocks.last().ok_or(LedgerError::EmptyChain)?;
        let candidate = Block::create(payload, tip)?;
        self.commit_candidate(&mut blocks, candidate)
    }

    fn append_block(&self, candidate: Block) -> Result<AppendOutcome, LedgerError> {
        let mut blocks = self.write()?;
        self.commit_candidate(&mut blocks, candidate)
    }
}

impl LedgerReader for InMemoryLedger {
    fn snapshot(&self) -> Result<Vec<Block>, LedgerError> {
        Ok(self.read()?.clone())
    }

    fn tip(&self) -> Result<Block, LedgerError> {
        self.read()?.last().cloned().ok_or(LedgerError::EmptyChain)
    }

    fn get(&self, position: u64) -> Result<Option<Block>, LedgerError> {
        let blocks = self.read()?;
        let Ok(index) = usize::try_from(position) else {
            return Ok(None);
        };
        Ok(blocks.get(index).cloned())
    }

    fn block_count(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.len())
    }
}
