//! Typed connection, pool and logging options

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pool sizing and timeout options handed to a [`Connector`](crate::Connector).
///
/// Every field is optional: `None` means the caller did not specify it and
/// the lifecycle layer (or the driver) picks a default. Driver-specific
/// settings that have no dedicated field are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolOptions {
    /// Minimum number of connections the driver keeps open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_pool_size: Option<u32>,

    /// Maximum number of connections the driver may open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pool_size: Option<u32>,

    /// How long server selection may take before failing, in milliseconds
    #[serde(
        default,
        rename = "serverSelectionTimeoutMS",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_selection_timeout_ms: Option<u64>,

    /// Socket inactivity timeout in milliseconds
    #[serde(
        default,
        rename = "socketTimeoutMS",
        skip_serializing_if = "Option::is_none"
    )]
    pub socket_timeout_ms: Option<u64>,

    /// Driver-specific fields passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PoolOptions {
    /// Create empty options (nothing specified)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_pool_size(mut self, size: u32) -> Self {
        self.min_pool_size = Some(size);
        self
    }

    pub fn with_max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = Some(size);
        self
    }

    pub fn with_server_selection_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.server_selection_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_socket_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.socket_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set a driver-specific extension field
    pub fn with_extra(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Look up a driver-specific extension field
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Partial retry settings as supplied by a caller.
///
/// Unset fields fall back to the retry defaults when the policy is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryOverrides {
    /// Total number of attempts, including the first one
    #[serde(default, alias = "maxRetries", skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Wait before the first retry, in milliseconds
    #[serde(
        default,
        alias = "retryInterval",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_interval_ms: Option<u64>,

    /// Growth factor applied to the wait after each failed attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_factor: Option<f64>,
}

impl RetryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_base_interval_ms(mut self, interval_ms: u64) -> Self {
        self.base_interval_ms = Some(interval_ms);
        self
    }

    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = Some(factor);
        self
    }
}

/// Configuration for a single named connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Driver connection string
    pub uri: String,

    /// Pool options; unset fields receive the pool defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PoolOptions>,

    /// Retry overrides; unset fields receive the retry defaults
    #[serde(
        default,
        alias = "retryOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub retry: Option<RetryOverrides>,
}

impl ConnectionConfig {
    /// Create a configuration for the given URI with all defaults
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            options: None,
            retry: None,
        }
    }

    pub fn with_options(mut self, options: PoolOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_retry(mut self, retry: RetryOverrides) -> Self {
        self.retry = Some(retry);
        self
    }
}

/// Verbosity of emitted log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Output format for log events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Simple,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Whether to install a log subscriber at all
    pub enabled: bool,
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            format: LogFormat::Simple,
        }
    }
}
