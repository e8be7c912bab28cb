//! Player events
//!
//! Event-based communication for UI synchronization. The player queues events
//! as state changes and the host drains them once per tick.

use crate::types::{PlaybackState, PlayerPosition, RepeatMode};
use folio_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    /// Engine state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A different track was attached to the output
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position moved (media time update or seek)
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration, once known
        duration_ms: Option<u64>,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Stored volume level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Shuffle or repeat changed
    ModesChanged {
        /// Shuffle enabled
        shuffle: bool,
        /// Repeat mode
        repeat: RepeatMode,
    },

    /// A catalog fetch started or finished
    LoadingChanged {
        /// Whether a fetch is in flight
        loading: bool,
    },

    /// Catalog snapshot replaced
    CatalogChanged {
        /// Number of tracks in the new snapshot
        len: usize,
        /// Selected index after revalidation
        selected: Option<usize>,
    },

    /// Catalog fetch failed
    CatalogError {
        /// Error description
        message: String,
    },

    /// Notification shown or cleared
    Notification {
        /// Visible message, `None` when cleared
        message: Option<String>,
    },

    /// A track failed to start or the media element errored
    PlaybackError {
        /// Error description
        message: String,
    },

    /// Playlist panel, minimized flag or position changed
    LayoutChanged {
        /// Playlist panel visible
        playlist_visible: bool,
        /// Player minimized
        minimized: bool,
        /// Dragged position
        position: Option<PlayerPosition>,
    },
}
