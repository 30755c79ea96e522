use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by a catalogue backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid remote URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to build request for '{url}': {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to '{url}' timed out")]
    Timeout { url: String },

    #[error("Remote returned {status} for '{url}': {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
