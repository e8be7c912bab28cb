//! Playback engine
//!
//! Owns the single `AudioOutput`, the volume/mute state and the one active
//! fade. Every transition tears down the previous source before attaching a
//! new one, so two tracks can never be audible together.

use crate::error::{PlaybackError, Result};
use crate::events::PlayerEvent;
use crate::fade::{Fade, FadeCompletion, FadeCurve};
use crate::output::{resolve_media_url, AudioOutput, MediaEvent};
use crate::types::{PlaybackState, PlayerConfig};
use crate::volume::Volume;
use folio_core::Track;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Outcome of a media event the controller must act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSignal {
    /// Current track played to its end
    Ended,

    /// Media element failed; the source has been detached
    Failed(String),
}

/// Single-source playback engine
pub struct PlaybackEngine<O: AudioOutput> {
    output: O,
    state: PlaybackState,
    current: Option<Track>,
    loaded: bool,

    volume: Volume,
    fade: Option<Fade>,
    fade_duration: Duration,
    fade_curve: FadeCurve,

    position: Duration,
    duration: Option<Duration>,
    /// Source reached its end while paused; the next resume advances
    ended: bool,
    media_base_url: Option<String>,

    pending_events: Vec<PlayerEvent>,
}

impl<O: AudioOutput> PlaybackEngine<O> {
    /// Create new engine around an output
    pub fn new(output: O, config: &PlayerConfig) -> Self {
        Self {
            output,
            state: PlaybackState::Idle,
            current: None,
            loaded: false,
            volume: Volume::default(),
            fade: None,
            fade_duration: config.fade_duration(),
            fade_curve: config.fade_curve,
            position: Duration::ZERO,
            duration: None,
            ended: false,
            media_base_url: config.media_base_url.clone(),
            pending_events: Vec::new(),
        }
    }

    // ===== Transport =====

    /// Stop whatever is playing and start `track`
    ///
    /// The previous source is paused and detached before the new one is
    /// attached. Output volume starts at zero and fades up to the effective
    /// volume. On failure the engine returns to `Idle` with nothing attached.
    pub fn play(&mut self, track: &Track, now: Instant) -> Result<()> {
        self.fade = None;
        self.detach();

        let previous_track_id = self.current.replace(track.clone()).map(|t| t.id);
        self.position = Duration::ZERO;
        self.duration = track.duration_hint();
        self.ended = false;
        self.set_state(PlaybackState::Loading);
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });

        let url = resolve_media_url(&track.src, self.media_base_url.as_deref());
        if url.is_empty() {
            return Err(self.fail_start(PlaybackError::MissingSource(track.id.clone())));
        }

        if let Err(e) = self.output.load(&url) {
            return Err(self.fail_start(e));
        }
        self.loaded = true;
        self.output.set_volume(0.0);

        if let Err(e) = self.output.play() {
            return Err(self.fail_start(e));
        }

        debug!(track_id = %track.id, url = %url, "Playback started");
        self.set_state(PlaybackState::Playing);
        self.fade = Some(Fade::fade_in(
            self.volume.gain(),
            now,
            self.fade_duration,
            self.fade_curve,
        ));
        self.tick(now);
        Ok(())
    }

    /// Pause with a fade-out
    ///
    /// State flips to `Paused` immediately; the output itself is paused when
    /// the fade completes. No-op unless playing.
    pub fn pause(&mut self, now: Instant) {
        if self.state != PlaybackState::Playing {
            return;
        }

        self.set_state(PlaybackState::Paused);
        self.fade = Some(Fade::fade_out(
            self.output.volume(),
            now,
            self.fade_duration,
            self.fade_curve,
        ));
        self.tick(now);
    }

    /// Resume from pause (or from the end of the order) with a fade-in
    ///
    /// Cancels a pending fade-out. On rejection the state is left unchanged.
    pub fn resume(&mut self, now: Instant) -> Result<()> {
        if !self.loaded {
            return Err(PlaybackError::NoTrackLoaded);
        }

        match self.state {
            PlaybackState::Paused => {}
            PlaybackState::Stopped => {
                self.output.seek(Duration::ZERO);
                self.position = Duration::ZERO;
            }
            _ => return Ok(()),
        }

        self.fade = None;
        self.output.set_volume(0.0);
        self.output.play()?;

        self.set_state(PlaybackState::Playing);
        self.fade = Some(Fade::fade_in(
            self.volume.gain(),
            now,
            self.fade_duration,
            self.fade_curve,
        ));
        self.tick(now);
        Ok(())
    }

    /// Restart the current track from zero without a fade (repeat one)
    pub fn restart(&mut self) -> Result<()> {
        if !self.loaded {
            return Err(PlaybackError::NoTrackLoaded);
        }

        self.fade = None;
        self.ended = false;
        self.output.seek(Duration::ZERO);
        self.position = Duration::ZERO;
        self.emit_position();
        self.output.set_volume(self.volume.gain());

        if let Err(e) = self.output.play() {
            self.set_state(PlaybackState::Paused);
            return Err(e);
        }
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Stop at the end of the play order
    ///
    /// The source stays attached so a later resume restarts it.
    pub fn stop_at_end(&mut self) {
        self.fade = None;
        self.ended = false;
        if self.loaded {
            self.output.pause();
        }
        self.set_state(PlaybackState::Stopped);
    }

    /// Seek within the current track
    ///
    /// Clamped to `[0, duration]` when the duration is known. Returns false
    /// if nothing is attached.
    pub fn seek(&mut self, position: Duration) -> bool {
        if !self.loaded {
            return false;
        }

        let target = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        self.output.seek(target);
        self.position = target;
        self.ended = false;
        self.emit_position();
        true
    }

    /// Detach everything and go idle
    pub fn shutdown(&mut self) {
        self.fade = None;
        self.detach();
        self.set_state(PlaybackState::Idle);
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped)
    ///
    /// While muted only the stored level changes. A running fade-in is
    /// cancelled and the new level applied directly; a fade-out into pause
    /// keeps running, capped at the new effective gain.
    pub fn set_volume(&mut self, level: f32) -> f32 {
        let level = self.volume.set_level(level);
        self.apply_volume();
        self.emit_volume();
        level
    }

    /// Toggle mute, returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        self.volume.toggle_mute();
        self.apply_volume();
        self.emit_volume();
        self.volume.is_muted()
    }

    /// Restore a volume without emitting (startup)
    pub fn restore_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.output.set_volume(self.volume.gain());
    }

    // ===== Time =====

    /// Advance the active fade to `now`
    pub fn tick(&mut self, now: Instant) {
        let Some(fade) = self.fade else {
            return;
        };

        // Mute caps a running fade
        self.output.set_volume(fade.level_at(now).min(self.volume.gain()));

        if fade.is_complete(now) {
            self.fade = None;
            if fade.completion() == FadeCompletion::Pause {
                self.output.pause();
            }
        }
    }

    /// Apply feedback from the media element
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Option<EngineSignal> {
        if !self.loaded {
            return None;
        }

        match event {
            MediaEvent::TimeUpdate(position) => {
                self.position = position;
                self.emit_position();
                None
            }
            MediaEvent::DurationChange(duration) => {
                self.duration = Some(duration);
                self.emit_position();
                None
            }
            MediaEvent::Ended => {
                if let Some(duration) = self.duration {
                    self.position = duration;
                }
                match self.state {
                    PlaybackState::Playing => Some(EngineSignal::Ended),
                    PlaybackState::Paused => {
                        // Ran out during the fade into pause
                        debug!("Track ended while pausing");
                        self.fade = None;
                        self.output.pause();
                        self.ended = true;
                        self.emit_position();
                        None
                    }
                    _ => None,
                }
            }
            MediaEvent::Error(message) => {
                warn!(error = %message, "Media element error");
                self.fade = None;
                self.detach();
                self.set_state(PlaybackState::Idle);
                Some(EngineSignal::Failed(message))
            }
        }
    }

    // ===== Queries =====

    /// Current engine state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether audio is (or is about to be) audible
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether a source is attached
    pub fn has_source(&self) -> bool {
        self.loaded
    }

    /// Track most recently handed to `play`
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Current playback position
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Track duration, once known
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Stored volume level (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Whether the source ended while paused, so resuming should advance
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Whether a fade is in flight
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Get the underlying output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get the underlying output mutably
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Drain queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Private helpers =====

    fn detach(&mut self) {
        if self.loaded {
            self.output.pause();
            self.output.unload();
            self.loaded = false;
        }
        self.ended = false;
    }

    fn fail_start(&mut self, error: PlaybackError) -> PlaybackError {
        warn!(%error, "Track failed to start");
        self.detach();
        self.set_state(PlaybackState::Idle);
        error
    }

    fn apply_volume(&mut self) {
        match self.fade {
            Some(fade) if !fade.is_fade_in() => {
                let capped = self.output.volume().min(self.volume.gain());
                self.output.set_volume(capped);
            }
            _ => {
                self.fade = None;
                self.output.set_volume(self.volume.gain());
            }
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlayerEvent::PositionUpdate {
            position_ms: duration_ms(self.position),
            duration_ms: self.duration.map(duration_ms),
        });
    }

    fn emit_volume(&mut self) {
        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
