/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No usable location for the store file
    #[error("No preferences directory available")]
    NoConfigDir,

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for folio_core::FolioError {
    fn from(err: StorageError) -> Self {
        folio_core::FolioError::storage(err.to_string())
    }
}
