//! Registry of named live connections

use std::collections::HashMap;
use std::sync::Arc;

use doclink_core::{
    Connection, ConnectionAttemptResult, ConnectionConfig, Connector, PoolOptions,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::pool::{PoolDefaults, resolve_pool_options};
use crate::reconnect::{RetryPolicy, RetryingConnector};


/// Owns live connection handles by name.
///
/// Entries are created only by [`connect_all`](Self::connect_all) and
/// removed only by [`close_one`](Self::close_one) or
/// [`close_all`](Self::close_all). There is no expiry or health-based
/// eviction.
pub struct ConnectionRegistry {
    /// Connector used for every attempt
    connector: RetryingConnector,

    /// Pool values used for options a config leaves unset
    pool_defaults: PoolDefaults,

    /// Registered connections
    connections: RwLock<HashMap<String, Arc<dyn Connection>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry that opens connections through `connector`
    pub fn new<C: Connector>(connector: C) -> Self {
        Self::from_shared(Arc::new(connector))
    }

    /// Create an empty registry around an already shared connector
    pub fn from_shared(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector: RetryingConnector::from_shared(connector),
            pool_defaults: PoolDefaults::default(),
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the pool defaults applied to unset options
    pub fn with_pool_defaults(mut self, defaults: PoolDefaults) -> Self {
        self.pool_defaults = defaults;
        self
    }

    /// Pool values used for options a config leaves unset
    pub fn pool_defaults(&self) -> &PoolDefaults {
        &self.pool_defaults
    }

    /// Connect once without registering the result.
    ///
    /// Unset retry fields come from [`RetryPolicy::default`] and unset pool
    /// fields from the registry's [`PoolDefaults`].
    pub async fn connect(&self, config: &ConnectionConfig) -> ConnectionAttemptResult {
        let (options, policy) = self.prepare(config);
        self.connector
            .attempt_connect(&config.uri, &options, &policy)
            .await
    }

    /// Connect every config in the order given, registering each success
    /// under its key.
    ///
    /// Connections are attempted one at a time. A failure for one key never
    /// stops the remaining keys. A success replaces any existing entry for
    /// the same key without closing the previous handle.
    pub async fn connect_all(
        &self,
        configs: &IndexMap<String, ConnectionConfig>,
    ) -> IndexMap<String, ConnectionAttemptResult> {
        self.connect_all_inner(configs, None).await
    }

    /// Like [`connect_all`](Self::connect_all), but stops attempting new
    /// keys once `cancel` fires.
    ///
    /// Keys not yet attempted report [`DoclinkError::Cancelled`](doclink_core::DoclinkError::Cancelled).
    pub async fn connect_all_with_cancel(
        &self,
        configs: &IndexMap<String, ConnectionConfig>,
        cancel: &CancellationToken,
    ) -> IndexMap<String, ConnectionAttemptResult> {
        self.connect_all_inner(configs, Some(cancel)).await
    }

    async fn connect_all_inner(
        &self,
        configs: &IndexMap<String, ConnectionConfig>,
        cancel: Option<&CancellationToken>,
    ) -> IndexMap<String, ConnectionAttemptResult> {
        tracing::info!(count = configs.len(), "connecting named connections");
        let mut results = IndexMap::with_capacity(configs.len());

        for (key, config) in configs {
            let span = tracing::info_span!("connect", key = %key);
            let result = async {
                let (options, policy) = self.prepare(config);
                match cancel {
                    Some(token) => {
                        self.connector
                            .attempt_connect_with_cancel(&config.uri, &options, &policy, token)
                            .await
                    }
                    None => {
                        self.connector
                            .attempt_connect(&config.uri, &options, &policy)
                            .await
                    }
                }
            }
            .instrument(span)
            .await;

            if let Ok(handle) = &result {
                self.register(key, handle.clone());
            }
            results.insert(key.clone(), result);
        }

        let failed = results.values().filter(|r| r.is_err()).count();
        tracing::info!(
            succeeded = results.len() - failed,
            failed,
            "named connections processed"
        );
        results
    }

    fn prepare(&self, config: &ConnectionConfig) -> (PoolOptions, RetryPolicy) {
        let options = resolve_pool_options(config.options.as_ref(), &self.pool_defaults);
        let policy = RetryPolicy::merged(config.retry.as_ref());
        (options, policy)
    }

    fn register(&self, key: &str, handle: Arc<dyn Connection>) {
        let previous = self.connections.write().insert(key.to_string(), handle);
        if previous.is_some() {
            tracing::warn!(key, "replaced a registered connection without closing it");
        }
    }

    /// Get a registered connection
    pub fn get(&self, key: &str) -> Option<Arc<dyn Connection>> {
        self.connections.read().get(key).cloned()
    }

    /// Check if a connection is registered under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.connections.read().contains_key(key)
    }

    /// Keys of all registered connections, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.connections.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }

    /// Close and remove the connection registered under `key`.
    ///
    /// Returns `false` without doing anything if the key is absent. A failed
    /// close is logged and the entry is removed regardless.
    #[tracing::instrument(skip(self))]
    pub async fn close_one(&self, key: &str) -> bool {
        let handle = self.connections.write().remove(key);
        match handle {
            Some(handle) => {
                self.close_handle(key, handle).await;
                true
            }
            None => {
                tracing::debug!("no registered connection to close");
                false
            }
        }
    }

    /// Close and remove every registered connection.
    ///
    /// Connections are closed in key order. One failed close never stops
    /// the sweep. Returns the number of entries removed.
    #[tracing::instrument(skip(self))]
    pub async fn close_all(&self) -> usize {
        let mut drained: Vec<_> = self.connections.write().drain().collect();
        drained.sort_by(|(a, _), (b, _)| a.cmp(b));
        let count = drained.len();

        for (key, handle) in drained {
            self.close_handle(&key, handle).await;
        }
        count
    }

    async fn close_handle(&self, key: &str, handle: Arc<dyn Connection>) {
        match self.connector.connector().close(handle.as_ref()).await {
            Ok(()) => tracing::info!(key, "disconnected"),
            Err(error) => {
                tracing::warn!(key, error = %error, "failed to close connection, discarding it")
            }
        }
    }
}
