//! Connection establishment with bounded exponential-backoff retry
//!
//! # Example
//!
//! ```ignore
//! use doclink_connection::reconnect::{RetryPolicy, RetryingConnector};
//!
//! let policy = RetryPolicy::new(3, 100, 2.0);
//! let connector = RetryingConnector::new(MongoDbConnector::new());
//!
//! // Waits 100ms, then 200ms between the three attempts
//! let handle = connector
//!     .attempt_connect("mongodb://localhost:27017", &options, &policy)
//!     .await?;
//! ```

mod connector;
mod policy;


pub use connector::{RetryingConnector, redact_uri};
pub use policy::RetryPolicy;
