//! Opt-in process-wide registry
//!
//! Nothing here is created implicitly. An application that wants a single
//! ambient registry calls [`init`] once at startup and [`get`] afterwards;
//! everything else should pass a [`ConnectionRegistry`] explicitly.

use std::sync::{Arc, OnceLock};

use doclink_core::{DoclinkError, Result};

use crate::ConnectionRegistry;

static SHARED_REGISTRY: OnceLock<Arc<ConnectionRegistry>> = OnceLock::new();

/// Install `registry` as the process-wide instance.
///
/// Fails with [`DoclinkError::Configuration`] if one is already installed.
pub fn init(registry: ConnectionRegistry) -> Result<Arc<ConnectionRegistry>> {
    let registry = Arc::new(registry);
    SHARED_REGISTRY.set(registry.clone()).map_err(|_| {
        DoclinkError::Configuration("shared connection registry is already initialized".into())
    })?;
    tracing::debug!("shared connection registry initialized");
    Ok(registry)
}

/// Get the process-wide registry, if [`init`] was called
pub fn get() -> Option<Arc<ConnectionRegistry>> {
    SHARED_REGISTRY.get().cloned()
}
