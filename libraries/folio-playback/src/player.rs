//! Player controller - core orchestration
//!
//! Wires the catalog store, order resolver, playback engine, preference store
//! and notification sink behind one command surface. Single-threaded and
//! clock-free: the host passes `now` into every time-sensitive command and
//! calls [`Player::tick`] at frame rate.

use crate::{
    catalog::{CatalogStore, FetchOutcome, FetchRequest},
    engine::{EngineSignal, PlaybackEngine},
    events::PlayerEvent,
    notify::NotificationSink,
    order::{self, NextDecision},
    output::{AudioOutput, MediaEvent},
    preferences::{Preference, PreferenceStore, Preferences},
    snapshot::{progress_percent, PlayerSnapshot},
    types::{PlaybackState, PlayerConfig, PlayerPosition, RepeatMode},
};
use folio_core::{KeyValueStore, Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Music player controller
///
/// Generic over the platform audio output and the durable key/value store.
pub struct Player<O: AudioOutput, S: KeyValueStore> {
    config: PlayerConfig,

    engine: PlaybackEngine<O>,
    catalog: CatalogStore,
    preferences: PreferenceStore<S>,
    notifications: NotificationSink,

    shuffle: bool,
    repeat: RepeatMode,
    shuffle_order: Vec<usize>,
    rng: StdRng,

    pending_events: Vec<PlayerEvent>,
}

impl<O: AudioOutput, S: KeyValueStore> Player<O, S> {
    /// Create new player, restoring preferences from `store`
    pub fn new(config: PlayerConfig, output: O, store: S) -> Self {
        Self::with_rng(config, output, store, StdRng::from_entropy())
    }

    /// Create new player with a caller-supplied RNG (deterministic shuffles)
    pub fn with_rng(config: PlayerConfig, output: O, store: S, rng: StdRng) -> Self {
        let preferences = PreferenceStore::new(store);
        let restored = preferences.current().clone();

        let mut engine = PlaybackEngine::new(output, &config);
        engine.restore_volume(restored.volume);

        info!(
            volume = restored.volume,
            shuffle = restored.shuffle,
            repeat = %restored.repeat,
            "Player initialized"
        );

        Self {
            catalog: CatalogStore::new(&config),
            notifications: NotificationSink::new(config.notification_duration()),
            config,
            engine,
            preferences,
            shuffle: restored.shuffle,
            repeat: restored.repeat,
            shuffle_order: Vec::new(),
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Catalog =====

    /// Update the search term; a fetch is issued once typing pauses
    pub fn set_search_term(&mut self, term: &str, now: Instant) {
        self.catalog.set_search_term(term, now);
    }

    /// Issue a fetch for the current search term immediately
    ///
    /// Used for the initial unfiltered load at startup.
    pub fn refresh(&mut self) -> FetchRequest {
        let request = self.catalog.refresh();
        self.emit(PlayerEvent::LoadingChanged { loading: true });
        request
    }

    /// Deliver the result of a fetch issued by [`Player::tick`] or [`Player::refresh`]
    pub fn complete_fetch(&mut self, token: u64, result: folio_core::Result<Vec<Track>>) {
        let remembered = self
            .engine
            .current_track()
            .map(|t| t.id.clone())
            .or_else(|| self.preferences.current().last_track_id.clone());

        match self.catalog.complete(token, result, remembered.as_ref()) {
            FetchOutcome::Superseded => {}
            FetchOutcome::Applied { previous_len } => {
                self.emit(PlayerEvent::LoadingChanged { loading: false });
                if self.shuffle && previous_len != self.catalog.len() {
                    self.regenerate_order();
                }
                self.emit(PlayerEvent::CatalogChanged {
                    len: self.catalog.len(),
                    selected: self.catalog.selected(),
                });
            }
            FetchOutcome::Failed(message) => {
                self.emit(PlayerEvent::LoadingChanged { loading: false });
                self.emit(PlayerEvent::CatalogError { message });
            }
        }
    }

    // ===== Transport =====

    /// Play the catalog track at `index`
    pub fn play_index(&mut self, index: usize, now: Instant) {
        let Some(track) = self.catalog.get(index).cloned() else {
            debug!(index, len = self.catalog.len(), "Ignoring play of missing index");
            return;
        };

        self.catalog.select(index);
        self.start(&track, now);
    }

    /// Play the catalog track with `id`
    pub fn play_track(&mut self, id: &TrackId, now: Instant) {
        match self.catalog.position_of(id) {
            Some(index) => self.play_index(index, now),
            None => warn!(track_id = %id, "Track not in current catalog"),
        }
    }

    /// Pause if playing, otherwise resume (or start the selected track)
    pub fn toggle_play_pause(&mut self, now: Instant) {
        if self.engine.is_playing() {
            self.pause(now);
        } else {
            self.resume(now);
        }
    }

    /// Pause with a fade-out
    pub fn pause(&mut self, now: Instant) {
        self.engine.pause(now);
        self.collect_engine_events();
    }

    /// Resume with a fade-in
    ///
    /// Starts the selected track when nothing has been loaded yet, and moves
    /// on when the track ran out while pausing.
    pub fn resume(&mut self, now: Instant) {
        if !self.engine.has_source() {
            if let Some(index) = self.catalog.selected() {
                self.play_index(index, now);
            }
            return;
        }
        if self.engine.has_ended() {
            self.advance_after_end(now);
            return;
        }

        let result = self.engine.resume(now);
        self.collect_engine_events();
        if let Err(e) = result {
            self.report_playback_error(&e.to_string(), now);
        }
    }

    /// Advance according to shuffle and repeat
    pub fn next(&mut self, now: Instant) {
        let order = self.shuffle.then_some(self.shuffle_order.as_slice());
        let decision = order::next(self.current_index(), self.catalog.len(), order, self.repeat);

        match decision {
            None => debug!("Next ignored, catalog is empty"),
            Some(NextDecision::AdvanceTo(index)) => self.play_index(index, now),
            Some(NextDecision::RestartCurrent) => self.restart(now),
            Some(NextDecision::StopAtEnd) => {
                info!("Reached end of play order");
                self.engine.stop_at_end();
                self.collect_engine_events();
            }
        }
    }

    /// Step back according to shuffle and repeat
    pub fn previous(&mut self, now: Instant) {
        let order = self.shuffle.then_some(self.shuffle_order.as_slice());
        match order::previous(self.current_index(), self.catalog.len(), order, self.repeat) {
            Some(index) => self.play_index(index, now),
            None => debug!("Previous ignored, catalog is empty"),
        }
    }

    /// Seek within the current track (clamped to its duration)
    pub fn seek(&mut self, position: Duration) {
        self.engine.seek(position);
        self.collect_engine_events();
    }

    /// Seek to a fraction (0.0-1.0) of the current track
    pub fn seek_to_fraction(&mut self, fraction: f32) {
        let Some(duration) = self.engine.duration() else {
            return;
        };
        if !fraction.is_finite() {
            return;
        }
        self.seek(duration.mul_f32(fraction.clamp(0.0, 1.0)));
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped) and persist it
    pub fn set_volume(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        let stored = self.engine.set_volume(level);
        self.collect_engine_events();
        self.preferences.save(Preference::Volume(stored));
    }

    /// Toggle mute (not persisted)
    pub fn toggle_mute(&mut self) {
        self.engine.toggle_mute();
        self.collect_engine_events();
    }

    // ===== Modes =====

    /// Toggle shuffle, regenerating the order when enabled
    pub fn toggle_shuffle(&mut self, now: Instant) {
        self.set_shuffle(!self.shuffle);
        let label = if self.shuffle { "ON" } else { "OFF" };
        self.notify(format!("Shuffle: {label}"), now);
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
        if enabled {
            self.regenerate_order();
        } else {
            self.shuffle_order.clear();
        }
        self.preferences.save(Preference::Shuffle(enabled));
        self.emit_modes();
    }

    /// Cycle repeat off → all → one → off
    pub fn cycle_repeat(&mut self, now: Instant) {
        self.set_repeat(self.repeat.cycle());
        self.notify(format!("Repeat: {}", self.repeat.label()), now);
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.preferences.save(Preference::Repeat(mode));
        self.emit_modes();
    }

    // ===== Layout =====

    /// Show or hide the playlist panel
    pub fn set_playlist_visible(&mut self, visible: bool) {
        self.preferences.save(Preference::PlaylistVisible(visible));
        self.emit_layout();
    }

    /// Toggle the playlist panel
    pub fn toggle_playlist(&mut self) {
        let visible = !self.preferences.current().playlist_visible;
        self.set_playlist_visible(visible);
    }

    /// Toggle minimized; minimizing also hides the playlist
    pub fn toggle_minimized(&mut self) {
        let minimized = !self.preferences.current().minimized;
        self.preferences.save(Preference::Minimized(minimized));
        if minimized && self.preferences.current().playlist_visible {
            self.preferences.save(Preference::PlaylistVisible(false));
        }
        self.emit_layout();
    }

    /// Remember where the player was dragged
    pub fn set_position(&mut self, position: Option<PlayerPosition>) {
        self.preferences.save(Preference::Position(position));
        self.emit_layout();
    }

    // ===== Host integration =====

    /// Advance fades and timers
    ///
    /// Returns a fetch the host must perform when the search debounce expires.
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        self.engine.tick(now);
        self.collect_engine_events();

        if self.notifications.tick(now) {
            self.emit(PlayerEvent::Notification { message: None });
        }

        let request = self.catalog.poll(now);
        if request.is_some() {
            self.emit(PlayerEvent::LoadingChanged { loading: true });
        }
        request
    }

    /// Feed an event from the media element
    pub fn handle_media_event(&mut self, event: MediaEvent, now: Instant) {
        let signal = self.engine.handle_media_event(event);
        self.collect_engine_events();

        match signal {
            None => {}
            Some(EngineSignal::Ended) => self.advance_after_end(now),
            Some(EngineSignal::Failed(message)) => self.report_playback_error(&message, now),
        }
    }

    /// Show a transient notification
    pub fn notify(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        self.notifications.notify(message.clone(), now);
        self.emit(PlayerEvent::Notification {
            message: Some(message),
        });
    }

    /// Drain queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Detach the output; called on teardown
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
        self.collect_engine_events();
        info!("Player shut down");
    }

    // ===== Queries =====

    /// Render-ready view of all observable state
    pub fn snapshot(&self) -> PlayerSnapshot {
        let prefs = self.preferences.current();
        PlayerSnapshot {
            current_track: self.current_track().cloned(),
            selected_index: self.catalog.selected(),
            state: self.engine.state(),
            is_playing: self.engine.is_playing(),
            position_ms: millis(self.engine.position()),
            duration_ms: self.engine.duration().map(millis),
            volume: self.engine.volume(),
            is_muted: self.engine.is_muted(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            loading: self.catalog.is_loading(),
            catalog_error: self.catalog.error().map(str::to_string),
            track_count: self.catalog.len(),
            search_term: self.catalog.search_term().to_string(),
            notification: self.notifications.current().map(str::to_string),
            playlist_visible: prefs.playlist_visible,
            minimized: prefs.minimized,
            position: prefs.position,
        }
    }

    /// Playing track, or the selected one when nothing has played
    pub fn current_track(&self) -> Option<&Track> {
        self.engine
            .current_track()
            .or_else(|| self.catalog.selected_track())
    }

    /// Catalog snapshot
    pub fn tracks(&self) -> &[Track] {
        self.catalog.tracks()
    }

    /// Selected catalog index
    pub fn selected_index(&self) -> Option<usize> {
        self.catalog.selected()
    }

    /// Engine state
    pub fn state(&self) -> PlaybackState {
        self.engine.state()
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    /// Playback position
    pub fn position(&self) -> Duration {
        self.engine.position()
    }

    /// Track duration, once known
    pub fn duration(&self) -> Option<Duration> {
        self.engine.duration()
    }

    /// Progress through the current track (0-100)
    pub fn progress_percent(&self) -> f32 {
        progress_percent(self.engine.position(), self.engine.duration())
    }

    /// Stored volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.engine.volume()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.engine.is_muted()
    }

    /// Shuffle enabled
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Active shuffle order (empty when shuffle is off)
    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    /// Repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Catalog fetch in flight
    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    /// Sticky catalog error
    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog.error()
    }

    /// Visible notification
    pub fn notification(&self) -> Option<&str> {
        self.notifications.current()
    }

    /// Current preferences
    pub fn preferences(&self) -> &Preferences {
        self.preferences.current()
    }

    /// Player configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Get the audio output
    pub fn output(&self) -> &O {
        self.engine.output()
    }

    /// Get the audio output mutably
    pub fn output_mut(&mut self) -> &mut O {
        self.engine.output_mut()
    }

    /// Get the preference backing store
    pub fn store(&self) -> &S {
        self.preferences.store()
    }

    // ===== Private helpers =====

    fn start(&mut self, track: &Track, now: Instant) {
        let result = self.engine.play(track, now);
        self.collect_engine_events();

        match result {
            Ok(()) => {
                info!(track_id = %track.id, title = %track.title, "Now playing");
                self.preferences
                    .save(Preference::LastTrackId(Some(track.id.clone())));
                self.notify(format!("Playing: {}", track.title), now);
            }
            Err(e) => self.report_playback_error(&e.to_string(), now),
        }
    }

    fn advance_after_end(&mut self, now: Instant) {
        if self.repeat == RepeatMode::One {
            self.restart(now);
        } else {
            self.next(now);
        }
    }

    fn restart(&mut self, now: Instant) {
        if !self.engine.has_source() {
            if let Some(index) = self.catalog.selected() {
                self.play_index(index, now);
            }
            return;
        }

        let result = self.engine.restart();
        self.collect_engine_events();
        if let Err(e) = result {
            self.report_playback_error(&e.to_string(), now);
        }
    }

    fn report_playback_error(&mut self, message: &str, now: Instant) {
        warn!(error = %message, "Playback error");
        self.emit(PlayerEvent::PlaybackError {
            message: message.to_string(),
        });
        self.notify(format!("Playback failed: {message}"), now);
    }

    fn current_index(&self) -> usize {
        self.catalog.selected().unwrap_or(0)
    }

    fn regenerate_order(&mut self) {
        self.shuffle_order =
            order::shuffle_order(self.catalog.len(), self.catalog.selected(), &mut self.rng);
        debug!(len = self.shuffle_order.len(), "Shuffle order regenerated");
    }

    fn collect_engine_events(&mut self) {
        let events = self.engine.drain_events();
        self.pending_events.extend(events);
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_modes(&mut self) {
        self.emit(PlayerEvent::ModesChanged {
            shuffle: self.shuffle,
            repeat: self.repeat,
        });
    }

    fn emit_layout(&mut self) {
        let prefs = self.preferences.current();
        let event = PlayerEvent::LayoutChanged {
            playlist_visible: prefs.playlist_visible,
            minimized: prefs.minimized,
            position: prefs.position,
        };
        self.emit(event);
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
