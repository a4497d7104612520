//! Settings file describing named connections

use std::path::Path;

use doclink_core::{ConnectionConfig, DoclinkError, LoggingOptions, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named connections plus logging, as read from a TOML settings file.
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [connections.primary]
/// uri = "mongodb://localhost:27017/app"
///
/// [connections.primary.options]
/// maxPoolSize = 20
///
/// [connections.primary.retry]
/// maxAttempts = 3
/// baseIntervalMs = 500
/// ```
///
/// Connections keep the order they appear in the file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default)]
    pub logging: LoggingOptions,

    #[serde(default)]
    pub connections: IndexMap<String, ConnectionConfig>,
}

impl ConnectionSettings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| DoclinkError::Configuration(format!("invalid settings: {e}")))?;

        if let Some((key, _)) = settings
            .connections
            .iter()
            .find(|(_, config)| config.uri.trim().is_empty())
        {
            return Err(DoclinkError::Configuration(format!(
                "connection '{key}' has an empty uri"
            )));
        }

        tracing::debug!(
            connections = settings.connections.len(),
            "settings parsed"
        );
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading settings");
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }
}
