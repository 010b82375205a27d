use bookchain_types::CheckoutRecord;

use crate::block::Block;
use crate::error::LedgerError;
use crate::validation::RejectReason;

/// What happened to an append attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The candidate became the new tip.
    Committed(Block),
    /// The candidate failed validation; the chain is unchanged.
    Rejected(RejectReason),
}

impl AppendOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    pub fn block(&self) -> Option<&Block> {
        match self {
            Self::Committed(block) => Some(block),
            Self::Rejected(_) => None,
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Committed(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Write boundary for ledger append operations.
pub trait LedgerWriter: Send + Sync {
    /// Build a block for `payload` on top of the current tip, validate it, and commit it.
    fn append(&self, payload: CheckoutRecord) -> Result<AppendOutcome, LedgerError>;

    /// Validate an externally built block against the current tip and commit it.
    fn append_block(&self, candidate: Block) -> Result<AppendOutcome, LedgerError>;
}

/// Read boundary for ledger queries. Every read sees a fully committed chain.
pub trait LedgerReader: Send + Sync {
    fn snapshot(&self) -> Result<Vec<Block>, LedgerError>;

    fn tip(&self) -> Result<Block, LedgerError>;

    fn get(&self, position: u64) -> Result<Option<Block>, LedgerError>;

    fn block_count(&self) -> Result<usize, LedgerError>;
}
