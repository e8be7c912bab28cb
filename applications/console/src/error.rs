//! Error types for the console host

use thiserror::Error;

/// Console host errors
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Preference storage could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] folio_storage::StorageError),

    /// Catalog client could not be created
    #[error("Catalog client error: {0}")]
    Client(#[from] folio_server_client::ServerClientError),

    /// Terminal I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;
