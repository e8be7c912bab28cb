//! Error types for playback management

use folio_core::TrackId;
use thiserror::Error;

/// Playback errors
///
/// None of these escape the `Player`: it turns them into notifications and
/// state. They are public so platform `AudioOutput` implementations can
/// report failures in the same vocabulary.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Catalog has no tracks to play
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Track id not present in the current catalog snapshot
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Track has no playable media URL
    #[error("Track {0} has no media source")]
    MissingSource(TrackId),

    /// Media resource could not be loaded
    #[error("Media load failed: {0}")]
    Load(String),

    /// Media resource refused to start (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
