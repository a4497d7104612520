//! Doclink Connection - Connection lifecycle management
//!
//! This crate establishes named connections through a [`Connector`],
//! retries failed attempts with exponential backoff, and keeps the live
//! handles in a registry until they are explicitly closed.
//!
//! [`Connector`]: doclink_core::Connector

mod config;
pub mod pool;
pub mod reconnect;
mod registry;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use config::ConnectionSettings;
pub use pool::{PoolDefaults, resolve_pool_options, validate_pool_options};
pub use reconnect::{RetryPolicy, RetryingConnector};
pub use registry::ConnectionRegistry;
