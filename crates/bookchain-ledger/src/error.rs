use bookchain_crypto::{ChainError, HasherError};

/// Errors produced by ledger operations.
///
/// A candidate block failing validation is not an error; it is reported as
/// [`AppendOutcome::Rejected`](crate::AppendOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger {0} lock poisoned")]
    LockPoisoned(&'static str),

    #[error("ledger has no genesis block")]
    EmptyChain,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error("commit sink error: {0}")]
    Sink(String),
}

impl From<HasherError> for LedgerError {
    fn from(err: HasherError) -> Self {
        match err {
            HasherError::Serialization(msg) => Self::Serialization(msg),
        }
    }
}

impl From<ChainError> for LedgerError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Encoding(inner) => inner.into(),
            other => Self::Integrity(other.to_string()),
        }
    }
}
