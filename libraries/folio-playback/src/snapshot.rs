//! Read-only view of player state for rendering

use crate::types::{PlaybackState, PlayerPosition, RepeatMode};
use folio_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything a UI needs to draw the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Playing track, or the selected catalog track when nothing has played
    pub current_track: Option<Track>,
    /// Selected catalog index
    pub selected_index: Option<usize>,
    /// Engine state
    pub state: PlaybackState,
    /// Whether audio is playing
    pub is_playing: bool,
    /// Playback position in milliseconds
    pub position_ms: u64,
    /// Track duration in milliseconds, once known
    pub duration_ms: Option<u64>,
    /// Stored volume (0.0-1.0)
    pub volume: f32,
    /// Whether muted
    pub is_muted: bool,
    /// Shuffle enabled
    pub shuffle: bool,
    /// Repeat mode
    pub repeat: RepeatMode,
    /// Catalog fetch in flight
    pub loading: bool,
    /// Sticky catalog error
    pub catalog_error: Option<String>,
    /// Tracks in the catalog snapshot
    pub track_count: usize,
    /// Current search term
    pub search_term: String,
    /// Visible notification
    pub notification: Option<String>,
    /// Playlist panel visible
    pub playlist_visible: bool,
    /// Player minimized
    pub minimized: bool,
    /// Dragged position
    pub position: Option<PlayerPosition>,
}

impl PlayerSnapshot {
    /// Elapsed time as "m:ss"
    pub fn elapsed_label(&self) -> String {
        format_time(Duration::from_millis(self.position_ms))
    }

    /// Duration as "m:ss" ("0:00" when unknown)
    pub fn duration_label(&self) -> String {
        self.duration_ms
            .map_or_else(|| format_time(Duration::ZERO), |ms| format_time(Duration::from_millis(ms)))
    }

    /// Progress through the track (0-100)
    pub fn progress_percent(&self) -> f32 {
        progress_percent(
            Duration::from_millis(self.position_ms),
            self.duration_ms.map(Duration::from_millis),
        )
    }
}

/// Format a duration as "m:ss"
///
/// Minutes are not wrapped into hours.
pub fn format_time(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// Position as a percentage of duration (0 when duration is unknown or zero)
pub fn progress_percent(position: Duration, duration: Option<Duration>) -> f32 {
    match duration {
        Some(d) if !d.is_zero() => {
            (position.as_secs_f32() / d.as_secs_f32() * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}
