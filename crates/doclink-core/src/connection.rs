//! Connection handle and connector capability traits

use crate::{DoclinkError, PoolOptions, Result};
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// A live connection handle returned by a [`Connector`].
///
/// Handles are opaque to the lifecycle layer: it only needs to know where a
/// handle points and how to close it.
#[async_trait]
pub trait Connection: Send + Sync {
    /// The URI this connection was opened against
    fn uri(&self) -> &str;

    /// Close the connection
    ///
    /// Closing an already-closed connection should be a no-op, but callers
    /// treat failures here as best-effort.
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;

    /// Get a reference to this connection as `Any` for downcasting to the
    /// driver's concrete handle
    fn as_any(&self) -> &dyn Any;
}

/// Capability that performs the actual network handshake for a driver.
///
/// Implementations translate [`PoolOptions`] into whatever the driver
/// understands. A failed `open` should surface the driver's own error;
/// retrying is the caller's concern.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Open a new connection
    async fn open(&self, uri: &str, options: &PoolOptions) -> Result<Arc<dyn Connection>>;

    /// Close a connection previously returned by [`Connector::open`]
    async fn close(&self, handle: &dyn Connection) -> Result<()> {
        handle.close().await
    }
}

#[async_trait]
impl<T: Connector> Connector for Arc<T> {
    async fn open(&self, uri: &str, options: &PoolOptions) -> Result<Arc<dyn Connection>> {
        (**self).open(uri, options).await
    }

    async fn close(&self, handle: &dyn Connection) -> Result<()> {
        (**self).close(handle).await
    }
}

/// Outcome of a connection attempt: the live handle, or the terminal error.
pub type ConnectionAttemptResult = std::result::Result<Arc<dyn Connection>, DoclinkError>;
