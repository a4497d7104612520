//! MongoDB connector implementation

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use doclink_core::{Connection, Connector, DoclinkError, PoolOptions, Result};
use mongodb::error::ErrorKind;
use mongodb::{Client, options::ClientOptions};

/// Extension field naming the application in server logs
pub const APP_NAME: &str = "appName";
/// Extension field bounding the TCP connect phase, in milliseconds
pub const CONNECT_TIMEOUT_MS: &str = "connectTimeoutMS";
/// Extension field bounding how long a pooled connection may sit idle, in milliseconds
pub const MAX_IDLE_TIME_MS: &str = "maxIdleTimeMS";

const DEFAULT_DATABASE: &str = "admin";

/// MongoDB connector
///
/// Stateless: every [`open`](Connector::open) builds a new client with its
/// own connection pool.
pub struct MongoDbConnector;

impl MongoDbConnector {
    /// Create a new MongoDB connector
    pub fn new() -> Self {
        tracing::debug!("MongoDB connector initialized");
        Self
    }
}

impl Default for MongoDbConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for MongoDbConnector {
    #[tracing::instrument(skip(self, uri, options))]
    async fn open(&self, uri: &str, options: &PoolOptions) -> Result<Arc<dyn Connection>> {
        tracing::debug!("connecting to MongoDB");

        let mut client_options = ClientOptions::parse(uri)
            .await
            .map_err(|e| DoclinkError::Configuration(format!("Invalid MongoDB URI: {}", e)))?;
        apply_pool_options(&mut client_options, options);

        let database = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| DoclinkError::Driver(format!("Failed to create MongoDB client: {}", e)))?;

        // Server selection and authentication happen lazily, so force a round trip
        client
            .database(DEFAULT_DATABASE)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_connect_error)?;

        Ok(Arc::new(MongoDbConnection::new(
            client,
            database,
            uri.to_string(),
        )))
    }
}

/// Copy pool options onto the driver's client options.
///
/// `socketTimeoutMS` has no counterpart in the Rust driver and is ignored,
/// as are unknown extension fields.
pub fn apply_pool_options(client_options: &mut ClientOptions, options: &PoolOptions) {
    if let Some(min) = options.min_pool_size {
        client_options.min_pool_size = Some(min);
    }
    if let Some(max) = options.max_pool_size {
        client_options.max_pool_size = Some(max);
    }
    if let Some(timeout_ms) = options.server_selection_timeout_ms {
        client_options.server_selection_timeout = Some(Duration::from_millis(timeout_ms));
    }
    if let Some(timeout_ms) = options.socket_timeout_ms {
        tracing::debug!(timeout_ms, "socketTimeoutMS is not supported by the driver, ignoring");
    }

    for (key, value) in &options.extra {
        match key.as_str() {
            APP_NAME => match value.as_str() {
                Some(name) => client_options.app_name = Some(name.to_string()),
                None => warn_invalid_extra(key, value),
            },
            CONNECT_TIMEOUT_MS => match value.as_u64() {
                Some(ms) => client_options.connect_timeout = Some(Duration::from_millis(ms)),
                None => warn_invalid_extra(key, value),
            },
            MAX_IDLE_TIME_MS => match value.as_u64() {
                Some(ms) => client_options.max_idle_time = Some(Duration::from_millis(ms)),
                None => warn_invalid_extra(key, value),
            },
            _ => tracing::debug!(option = %key, "unsupported MongoDB option, ignoring"),
        }
    }
}

fn warn_invalid_extra(key: &str, value: &serde_json::Value) {
    tracing::warn!(option = %key, value = %value, "invalid value for MongoDB option, ignoring");
}

fn map_connect_error(error: mongodb::error::Error) -> DoclinkError {
    match *error.kind {
        ErrorKind::ServerSelection { .. } => {
            DoclinkError::Timeout(format!("MongoDB server selection failed: {}", error))
        }
        _ => DoclinkError::Connection(format!("Failed to connect to MongoDB: {}", error)),
    }
}

/// A live MongoDB client
pub struct MongoDbConnection {
    client: Client,
    database: String,
    uri: String,
    closed: AtomicBool,
}

impl MongoDbConnection {
    /// Wrap a connected client
    pub fn new(client: Client, database: String, uri: String) -> Self {
        Self {
            client,
            database,
            uri,
            closed: AtomicBool::new(false),
        }
    }

    /// Get the MongoDB connection behind a registry handle, if it is one
    pub fn from_handle(handle: &dyn Connection) -> Option<&Self> {
        handle.as_any().downcast_ref::<Self>()
    }

    /// Name of the database selected by the URI (`admin` if none)
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the MongoDB client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the database selected by the URI
    pub fn db(&self) -> mongodb::Database {
        self.client.database(&self.database)
    }
}

#[async_trait]
impl Connection for MongoDbConnection {
    fn uri(&self) -> &str {
        &self.uri
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.client.clone().shutdown().await;
        tracing::debug!(database = %self.database, "MongoDB client shut down");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
