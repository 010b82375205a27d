//! Cryptographic primitives for Bookchain.
//!
//! Provides SHA-256 content hashing with lowercase hex output and a generic
//! hash chain verifier for anything that implements [`ChainLink`].
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainError, ChainLink, HashChainVerifier};
pub use hasher::{ContentHasher, HasherError};
