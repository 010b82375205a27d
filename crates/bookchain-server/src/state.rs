use std::sync::Arc;

use bookchain_ledger::{InMemoryBookRegistry, InMemoryLedger, LedgerError, TracingSink};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<InMemoryLedger>,
    pub books: Arc<InMemoryBookRegistry>,
}

impl AppState {
    /// Fresh ledger (genesis only, commits logged) and an empty registry.
    pub fn new() -> Result<Self, LedgerError> {
        Ok(Self::from_parts(
            InMemoryLedger::with_sink(TracingSink)?,
            InMemoryBookRegistry::new(),
        ))
    }

    pub fn from_parts(ledger: InMemoryLedger, books: InMemoryBookRegistry) -> Self {
        Self {
            ledger: Arc::new(ledger),
            books: Arc::new(books),
        }
    }
}
