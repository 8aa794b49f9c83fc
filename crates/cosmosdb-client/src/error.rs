//! Error types for the Cosmos DB client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to Cosmos DB.
#[derive(Error, Debug)]
pub enum CosmosError {
    /// Transport-level failure (connection, TLS, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The account endpoint is not a valid absolute URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The access key is not valid base64.
    #[error("Invalid access key: {0}")]
    InvalidKey(String),

    /// A document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document has no value at the container's partition key path.
    #[error("Document has no partition key value at '{0}'")]
    MissingPartitionKey(String),

    /// The document has no string `id` field.
    #[error("Document has no string 'id' field")]
    MissingId,

    /// The service answered with a non-success status.
    #[error("Cosmos DB returned {status} ({code}): {message}")]
    Service {
        status: StatusCode,
        code: String,
        message: String,
    },
}

impl CosmosError {
    /// Build a service error with the status' canonical reason as code.
    pub fn service(status: StatusCode, message: impl Into<String>) -> Self {
        CosmosError::Service {
            status,
            code: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
        }
    }

    /// HTTP status of a service error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CosmosError::Service { status, .. } => Some(*status),
            CosmosError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the resource already exists.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }

    /// Whether the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
