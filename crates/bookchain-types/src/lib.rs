//! Foundation types for Bookchain.
//!
//! This crate provides the value types shared by every other Bookchain crate.
//! It has no knowledge of hashing algorithms or chain rules; it only defines
//! the shapes that travel between the ledger, the registry, and the HTTP layer.
//!
//! # Key Types
//!
//! - [`BlockHash`]: Lowercase hex digest identifying a block (empty for "no block")
//! - [`Timestamp`]: RFC3339 creation time, captured once and stored as text
//! - [`CheckoutRecord`]: Payload describing one book-checkout event
//! - [`Book`] / [`BookDraft`]: Registry entity with and without its derived id

pub mod book;
pub mod checkout;
pub mod error;
pub mod hash;
pub mod temporal;

pub use book::{Book, BookDraft};
pub use checkout::CheckoutRecord;
pub use error::TypeError;
pub use hash::BlockHash;
pub use temporal::Timestamp;
