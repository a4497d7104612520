//! MongoDB connector for Doclink
//!
//! Opens MongoDB clients for the connection lifecycle layer. Pool options
//! are translated into the official driver's `ClientOptions` and every new
//! client is proven with a `ping` before it is handed out.
//!
//! # Example
//!
//! ```ignore
//! use doclink_connection::ConnectionRegistry;
//! use doclink_driver_mongodb::MongoDbConnector;
//!
//! let registry = ConnectionRegistry::new(MongoDbConnector::new());
//! let results = registry.connect_all(&settings.connections).await;
//! ```

mod connector;
#[cfg(test)]
mod connector_tests;

pub use connector::*;
