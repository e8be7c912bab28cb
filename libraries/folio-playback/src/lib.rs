//! Folio - Playback Management
//!
//! Platform-agnostic player core for folio.
//!
//! This crate provides:
//! - Catalog store (debounced search, last-request-wins fetches)
//! - Play order resolution (shuffle permutation, repeat off/all/one)
//! - Single-source playback engine with fade in/out
//! - Volume control (linear 0.0-1.0, mute/unmute)
//! - Preference persistence over any key/value store
//! - Transient notifications
//!
//! # Architecture
//!
//! `folio-playback` owns no threads, clocks or I/O:
//! - Time is passed in as `Instant` and advanced by [`Player::tick`]
//! - Audio goes through the [`AudioOutput`] trait
//! - Catalog fetches are handed to the host as [`FetchRequest`]s and their
//!   results delivered back with [`Player::complete_fetch`]
//! - Preferences are stored through [`folio_core::KeyValueStore`]
//!
//! # Example
//!
//! ```rust
//! use folio_core::Track;
//! use folio_playback::{AudioOutput, Player, PlayerConfig, Result};
//! use folio_storage::MemoryStore;
//! use std::time::{Duration, Instant};
//!
//! #[derive(Default)]
//! struct Silent { volume: f32 }
//!
//! impl AudioOutput for Silent {
//!     fn load(&mut self, _url: &str) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn unload(&mut self) {}
//!     fn seek(&mut self, _position: Duration) {}
//!     fn set_volume(&mut self, volume: f32) { self.volume = volume; }
//!     fn volume(&self) -> f32 { self.volume }
//!     fn position(&self) -> Duration { Duration::ZERO }
//!     fn duration(&self) -> Option<Duration> { None }
//! }
//!
//! let now = Instant::now();
//! let mut player = Player::new(PlayerConfig::default(), Silent::default(), MemoryStore::new());
//!
//! let request = player.refresh();
//! player.complete_fetch(request.token, Ok(vec![
//!     Track::new("t1", "So What", "Miles Davis", "/media/t1.mp3"),
//! ]));
//!
//! player.play_index(0, now);
//! assert!(player.is_playing());
//! assert_eq!(player.notification(), Some("Playing: So What"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod engine;
pub mod error;
pub mod events;
pub mod fade;
pub mod notify;
pub mod order;
pub mod output;
pub mod player;
pub mod preferences;
pub mod snapshot;
pub mod timer;
pub mod types;
pub mod volume;

pub use catalog::{CatalogStore, FetchOutcome, FetchRequest};
pub use engine::{EngineSignal, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use fade::{Fade, FadeCurve};
pub use notify::NotificationSink;
pub use order::NextDecision;
pub use output::{resolve_media_url, AudioOutput, MediaEvent};
pub use player::Player;
pub use preferences::{Preference, PreferenceStore, Preferences};
pub use snapshot::{format_time, progress_percent, PlayerSnapshot};
pub use timer::Timer;
pub use types::{PlaybackState, PlayerConfig, PlayerPosition, RepeatMode};
pub use volume::{Volume, DEFAULT_VOLUME};
