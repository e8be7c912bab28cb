//! Preference store
//!
//! Typed view over a [`KeyValueStore`]. Each preference lives under its own
//! key, is parsed independently on load (a malformed value falls back to its
//! default without affecting the others) and is written synchronously on
//! change. Write failures are logged and never reach the caller.

use crate::types::{PlayerPosition, RepeatMode};
use crate::volume::DEFAULT_VOLUME;
use folio_core::{KeyValueStore, TrackId};
use tracing::warn;

/// Storage keys
pub mod keys {
    /// Stored volume level
    pub const VOLUME: &str = "audio.volume";
    /// Shuffle flag
    pub const SHUFFLE: &str = "playback.shuffle";
    /// Repeat mode
    pub const REPEAT: &str = "playback.repeat";
    /// Last successfully started track
    pub const LAST_TRACK_ID: &str = "player.last_track_id";
    /// Playlist panel visibility
    pub const PLAYLIST_VISIBLE: &str = "ui.playlist_visible";
    /// Minimized flag
    pub const MINIMIZED: &str = "ui.minimized";
    /// Dragged player position
    pub const POSITION: &str = "ui.position";
}

/// All persisted preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Volume level (0.0-1.0)
    pub volume: f32,
    /// Shuffle enabled
    pub shuffle: bool,
    /// Repeat mode
    pub repeat: RepeatMode,
    /// Last successfully started track
    pub last_track_id: Option<TrackId>,
    /// Playlist panel visible
    pub playlist_visible: bool,
    /// Player minimized
    pub minimized: bool,
    /// Dragged player position
    pub position: Option<PlayerPosition>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            shuffle: false,
            repeat: RepeatMode::Off,
            last_track_id: None,
            playlist_visible: false,
            minimized: false,
            position: None,
        }
    }
}

/// A single preference change
#[derive(Debug, Clone, PartialEq)]
pub enum Preference {
    /// Volume level
    Volume(f32),
    /// Shuffle flag
    Shuffle(bool),
    /// Repeat mode
    Repeat(RepeatMode),
    /// Last started track (`None` removes the key)
    LastTrackId(Option<TrackId>),
    /// Playlist panel visibility
    PlaylistVisible(bool),
    /// Minimized flag
    Minimized(bool),
    /// Dragged position (`None` removes the key)
    Position(Option<PlayerPosition>),
}

impl Preference {
    /// Storage key for this preference
    pub fn key(&self) -> &'static str {
        match self {
            Preference::Volume(_) => keys::VOLUME,
            Preference::Shuffle(_) => keys::SHUFFLE,
            Preference::Repeat(_) => keys::REPEAT,
            Preference::LastTrackId(_) => keys::LAST_TRACK_ID,
            Preference::PlaylistVisible(_) => keys::PLAYLIST_VISIBLE,
            Preference::Minimized(_) => keys::MINIMIZED,
            Preference::Position(_) => keys::POSITION,
        }
    }

    /// Encoded value, `None` meaning the key should be removed
    fn encode(&self) -> Option<String> {
        match self {
            Preference::Volume(v) => Some(v.to_string()),
            Preference::Shuffle(b) | Preference::PlaylistVisible(b) | Preference::Minimized(b) => {
                Some(b.to_string())
            }
            Preference::Repeat(mode) => Some(mode.as_str().to_string()),
            Preference::LastTrackId(id) => id.as_ref().map(|id| id.as_str().to_string()),
            Preference::Position(pos) => pos.as_ref().and_then(|p| serde_json::to_string(p).ok()),
        }
    }

    fn apply_to(&self, prefs: &mut Preferences) {
        match self {
            Preference::Volume(v) => prefs.volume = *v,
            Preference::Shuffle(b) => prefs.shuffle = *b,
            Preference::Repeat(mode) => prefs.repeat = *mode,
            Preference::LastTrackId(id) => prefs.last_track_id = id.clone(),
            Preference::PlaylistVisible(b) => prefs.playlist_visible = *b,
            Preference::Minimized(b) => prefs.minimized = *b,
            Preference::Position(pos) => prefs.position = *pos,
        }
    }
}

/// Typed preference persistence over a key/value store
pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
    current: Preferences,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Create a store and load current values
    pub fn new(store: S) -> Self {
        let current = Self::read(&store);
        Self { store, current }
    }

    /// Re-read every preference from the backing store
    pub fn load(&mut self) -> &Preferences {
        self.current = Self::read(&self.store);
        &self.current
    }

    /// Last loaded or saved values
    pub fn current(&self) -> &Preferences {
        &self.current
    }

    /// Persist one preference
    ///
    /// The in-memory view is always updated; a failed write is logged.
    pub fn save(&mut self, preference: Preference) {
        preference.apply_to(&mut self.current);

        let key = preference.key();
        let result = match preference.encode() {
            Some(value) => self.store.set(key, &value),
            None => self.store.remove(key),
        };

        if let Err(e) = result {
            warn!(key, error = %e, "Failed to persist preference");
        }
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume and return the backing store
    pub fn into_inner(self) -> S {
        self.store
    }

    fn read(store: &S) -> Preferences {
        let defaults = Preferences::default();

        Preferences {
            volume: store
                .get(keys::VOLUME)
                .and_then(|v| parse_volume(&v))
                .unwrap_or(defaults.volume),
            shuffle: store
                .get(keys::SHUFFLE)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.shuffle),
            repeat: store
                .get(keys::REPEAT)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.repeat),
            last_track_id: store
                .get(keys::LAST_TRACK_ID)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(TrackId::new),
            playlist_visible: store
                .get(keys::PLAYLIST_VISIBLE)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.playlist_visible),
            minimized: store
                .get(keys::MINIMIZED)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.minimized),
            position: store
                .get(keys::POSITION)
                .and_then(|v| serde_json::from_str::<PlayerPosition>(&v).ok())
                .filter(|p| p.x.is_finite() && p.y.is_finite()),
        }
    }
}

/// Finite numbers are clamped into range; anything else is rejected
fn parse_volume(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
