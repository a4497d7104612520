//! Doclink Core - Shared abstractions for the connection lifecycle manager
//!
//! This crate provides the traits and types every other Doclink crate
//! depends on:
//!
//! - `Connector` - Capability that opens (and closes) driver connections
//! - `Connection` - An opaque live connection handle
//! - `PoolOptions`, `RetryOverrides`, `ConnectionConfig` - Typed configuration
//! - `DoclinkError` - The error taxonomy shared across crates

mod connection;
mod error;
mod options;

pub use connection::*;
pub use error::*;
pub use options::*;
