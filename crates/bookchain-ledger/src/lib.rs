//! Append-only checkout ledger for Bookchain.
//!
//! This crate is the heart of Bookchain. It provides:
//! - The [`Block`] type with deterministic SHA-256 content hashing
//! - [`ChainValidator`], the pure rule deciding whether a block may extend another
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - [`InMemoryLedger`], a single-writer ledger guarded by an `RwLock`
//! - [`CommitSink`], the hook invoked after every commit
//! - [`InMemoryBookRegistry`], the book catalogue served next to the ledger

pub mod block;
pub mod error;
pub mod memory;
pub mod registry;
pub mod sink;
pub mod traits;
pub mod validation;

pub use block::Block;
pub use error::LedgerError;
pub use memory::{ChainSummary, InMemoryLedger};
pub use registry::{
    derive_book_id, BookRegistry, InMemoryBookRegistry, Registration, RegistryError,
};
pub use sink::{CommitSink, NoOpSink, TracingSink};
pub use traits::{AppendOutcome, LedgerReader, LedgerWriter};
pub use validation::{ChainValidator, RejectReason, ValidationReport, Violation, ViolationKind};
