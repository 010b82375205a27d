use tracing::info;

use crate::block::Block;
use crate::error::LedgerError;

/// Observer called once per committed block, in chain order.
///
/// Runs while the ledger write lock is held, so implementations must not call
/// back into the ledger. A failing sink does not undo the commit.
pub trait CommitSink: Send + Sync {
    fn on_commit(&self, block: &Block) -> Result<(), LedgerError>;
}

/// Sink that does nothing.
pub struct NoOpSink;

impl CommitSink for NoOpSink {
    fn on_commit(&self, _block: &Block) -> Result<(), LedgerError> {
        Ok(())
    }
}

/// Sink that logs every commit at `info`.
pub struct TracingSink;

impl CommitSink for TracingSink {
    fn on_commit(&self, block: &Block) -> Result<(), LedgerError> {
        info!(
            position = block.position,
            hash = %block.hash.short(),
            book_id = %block.payload.book_id,
            user_id = %block.payload.user_id,
            "block committed"
        );
        Ok(())
    }
}
