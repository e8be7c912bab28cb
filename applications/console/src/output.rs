//! Simulated audio output
//!
//! Keeps a wall-clock play position instead of producing sound, so the
//! console can drive the real player core end to end. `poll` turns elapsed
//! time into the media events a real element would raise.

use folio_playback::{AudioOutput, MediaEvent, PlaybackError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Interval between simulated time updates
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Audio output that only keeps time
#[derive(Debug, Default)]
pub struct SimulatedOutput {
    source: Option<String>,
    /// Position accumulated before the current run
    offset: Duration,
    /// When the current run started, if playing
    started_at: Option<Instant>,
    volume: f32,
    duration: Option<Duration>,
    last_update: Option<Instant>,
    ended: bool,
}

impl SimulatedOutput {
    /// Create an idle output
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently attached URL
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Whether the clock is running
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Position at `now`
    pub fn position_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started) => self.offset + now.saturating_duration_since(started),
            None => self.offset,
        }
    }

    /// Advance the simulation to `now`
    ///
    /// `length` is used as the track length until the first poll reports it
    /// as a duration change.
    pub fn poll(&mut self, now: Instant, length: Duration) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        if self.source.is_none() || self.ended {
            return events;
        }

        if self.duration.is_none() {
            self.duration = Some(length);
            events.push(MediaEvent::DurationChange(length));
        }

        if self.started_at.is_none() {
            return events;
        }

        let position = self.position_at(now);
        let total = self.duration.unwrap_or(length);

        if position >= total {
            self.offset = total;
            self.started_at = None;
            self.ended = true;
            events.push(MediaEvent::TimeUpdate(total));
            events.push(MediaEvent::Ended);
            return events;
        }

        let due = match self.last_update {
            Some(last) => now.saturating_duration_since(last) >= TIME_UPDATE_INTERVAL,
            None => true,
        };
        if due {
            self.last_update = Some(now);
            events.push(MediaEvent::TimeUpdate(position));
        }

        events
    }

    fn freeze(&mut self) {
        let now = Instant::now();
        self.offset = self.position_at(now);
        self.started_at = None;
    }
}

impl AudioOutput for SimulatedOutput {
    fn load(&mut self, url: &str) -> folio_playback::Result<()> {
        if url.trim().is_empty() {
            return Err(PlaybackError::Load("empty media URL".into()));
        }
        debug!(url, "Simulated load");
        self.source = Some(url.to_string());
        self.offset = Duration::ZERO;
        self.started_at = None;
        self.duration = None;
        self.last_update = None;
        self.ended = false;
        Ok(())
    }

    fn play(&mut self) -> folio_playback::Result<()> {
        if self.source.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
        self.ended = false;
        Ok(())
    }

    fn pause(&mut self) {
        if self.started_at.is_some() {
            self.freeze();
        }
    }

    fn unload(&mut self) {
        self.source = None;
        self.offset = Duration::ZERO;
        self.started_at = None;
        self.duration = None;
        self.ended = false;
    }

    fn seek(&mut self, position: Duration) {
        self.offset = position;
        self.ended = false;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> Duration {
        self.position_at(Instant::now())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}
