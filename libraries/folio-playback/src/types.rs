//! Core types for playback management

use crate::fade::FadeCurve;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Playback engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing loaded (initial, or after a failed load)
    Idle,

    /// Source assigned, playback requested but not confirmed
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Reached the end of the play order with repeat off
    Stopped,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the play order ends
    #[default]
    Off,

    /// Loop the entire play order
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Stored/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        }
    }

    /// Upper-case label used in notifications
    pub fn label(&self) -> &'static str {
        match self {
            RepeatMode::Off => "OFF",
            RepeatMode::All => "ALL",
            RepeatMode::One => "ONE",
        }
    }

    /// Next mode in the off → all → one cycle
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "off" => Ok(RepeatMode::Off),
            "all" => Ok(RepeatMode::All),
            "one" => Ok(RepeatMode::One),
            other => Err(format!("unknown repeat mode: {other:?}")),
        }
    }
}

/// Dragged player position on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    /// Horizontal offset in pixels
    pub x: f64,

    /// Vertical offset in pixels
    pub y: f64,
}

/// Configuration for the player controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Quiet period before a search term triggers a fetch (default: 300)
    pub search_debounce_ms: u64,

    /// How long a notification stays visible (default: 1500)
    pub notification_ms: u64,

    /// Volume fade length for start/pause/resume (default: 200)
    pub fade_ms: u64,

    /// Fade shape (default: linear)
    pub fade_curve: FadeCurve,

    /// Catalog page size (default: 100)
    pub fetch_limit: u32,

    /// Base URL prefixed to root-relative media sources
    pub media_base_url: Option<String>,
}

impl PlayerConfig {
    /// Search debounce as a Duration
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Notification display time as a Duration
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    /// Fade length as a Duration
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            notification_ms: 1500,
            fade_ms: 200,
            fade_curve: FadeCurve::Linear,
            fetch_limit: folio_core::types::DEFAULT_FETCH_LIMIT,
            media_base_url: None,
        }
    }
}
