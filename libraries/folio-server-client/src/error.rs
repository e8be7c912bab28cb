//! Error types for the folio server client.

use folio_core::FolioError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// GraphQL layer reported errors
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl From<ServerClientError> for FolioError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::InvalidUrl(msg) => FolioError::invalid_input(msg),
            ServerClientError::GraphQl(msg) => FolioError::catalog(msg),
            other => FolioError::network(other.to_string()),
        }
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
