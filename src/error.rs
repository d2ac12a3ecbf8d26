//! Typed errors for store lookups.
//!
//! The binary converts these to `anyhow::Error` at its boundary.

use std::error::Error as StdError;

/// Failure reported by a [`StoreApiRepository`](crate::catalog::StoreApiRepository).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PersistenceError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreApiError {
    /// Transport or I/O failure while fetching from the store. Never retried.
    #[error("failed to retrieve {url}")]
    Retrieval {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed api definition: {0}")]
    MalformedDefinition(String),

    /// Gateway endpoint must hold an HTTP and an HTTPS base separated by a comma.
    #[error("malformed gateway endpoint for environment '{environment}': {endpoint:?}")]
    MalformedEnvironmentConfig {
        environment: String,
        endpoint: String,
    },

    #[error("persistence failure: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid configuration {path}: {reason}")]
    Config { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, StoreApiError>;
