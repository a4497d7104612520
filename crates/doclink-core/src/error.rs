//! Error types for Doclink

use thiserror::Error;

/// Core error type for Doclink operations
#[derive(Error, Debug)]
pub enum DoclinkError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Close error: {0}")]
    Close(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Doclink operations
pub type Result<T> = std::result::Result<T, DoclinkError>;
