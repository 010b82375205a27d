//! HTTP server for Bookchain.
//!
//! Exposes the checkout ledger and the book registry as a small JSON API.
//! The ledger and registry are created by the caller and injected through
//! [`AppState`]; handlers never reach for global state.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::BookchainServer;
pub use state::AppState;
