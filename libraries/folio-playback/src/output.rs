//! Platform-agnostic audio output trait
//!
//! Abstracts the streaming media element that actually plays a track. The
//! engine holds exactly one `AudioOutput` and reuses it for every track, so
//! at most one source is ever attached at a time.

use crate::error::Result;
use std::time::Duration;

/// Platform-agnostic streaming audio output
///
/// Implementors wrap whatever plays a URL on the host platform. Calls are
/// synchronous requests; asynchronous feedback (position ticks, end of
/// track, decode errors) flows back through [`MediaEvent`].
pub trait AudioOutput {
    /// Attach a media source by URL, replacing any previous one
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or continue playback
    ///
    /// # Returns
    /// * `Err(_)` - Platform refused to play (autoplay policy, decode error)
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the source attached
    fn pause(&mut self);

    /// Detach the current source
    fn unload(&mut self);

    /// Jump to position within the current source
    fn seek(&mut self, position: Duration);

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Current output volume (0.0-1.0)
    fn volume(&self) -> f32;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration, once the media has reported it
    fn duration(&self) -> Option<Duration>;
}

impl<O: AudioOutput + ?Sized> AudioOutput for Box<O> {
    fn load(&mut self, url: &str) -> Result<()> {
        (**self).load(url)
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn unload(&mut self) {
        (**self).unload();
    }

    fn seek(&mut self, position: Duration) {
        (**self).seek(position);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }

    fn volume(&self) -> f32 {
        (**self).volume()
    }

    fn position(&self) -> Duration {
        (**self).position()
    }

    fn duration(&self) -> Option<Duration> {
        (**self).duration()
    }
}

/// Feedback from the media element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback position advanced
    TimeUpdate(Duration),

    /// Media metadata reported the total duration
    DurationChange(Duration),

    /// Current source played to its end
    Ended,

    /// Media element failed (network, decode)
    Error(String),
}

/// Resolve a track's `src` into a loadable URL
///
/// Sources starting with `http` pass through, root-relative paths are joined onto
/// `base` when one is configured, and anything else is returned unchanged.
/// An empty `src` resolves to an empty string, which fails to load.
pub fn resolve_media_url(src: &str, base: Option<&str>) -> String {
    let src = src.trim();

    if src.starts_with("http") {
        return src.to_string();
    }

    match base {
        Some(base) if src.starts_with('/') => format!("{}{}", base.trim_end_matches('/'), src),
        _ => src.to_string(),
    }
}

/// Fake output for unit tests
///
/// Records every call so tests can assert on the exact sequence.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakeOutput {
    pub calls: Vec<String>,
    pub source: Option<String>,
    pub playing: bool,
    pub volume: f32,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub reject_play: bool,
    pub reject_load: bool,
}

#[cfg(test)]
impl AudioOutput for FakeOutput {
    fn load(&mut self, url: &str) -> Result<()> {
        self.calls.push(format!("load {url}"));
        if self.reject_load {
            return Err(crate::PlaybackError::Load(url.to_string()));
        }
        self.source = Some(url.to_string());
        self.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push("play".into());
        if self.reject_play {
            return Err(crate::PlaybackError::PlayRejected("autoplay".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push("pause".into());
        self.playing = false;
    }

    fn unload(&mut self) {
        self.calls.push("unload".into());
        self.source = None;
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.calls.push(format!("seek {}", position.as_millis()));
        self.position = position;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            resolve_media_url("https://cdn.example.com/a.mp3", Some("http://localhost:3000")),
            "https://cdn.example.com/a.mp3"
        );
        assert_eq!(resolve_media_url("http://x/a.mp3", None), "http://x/a.mp3");
        assert_eq!(
            resolve_media_url("http-stream.local/a.mp3", Some("http://h")),
            "http-stream.local/a.mp3"
        );
    }

    #[test]
    fn root_relative_joins_base() {
        assert_eq!(
            resolve_media_url("/media/a.mp3", Some("http://localhost:3000/")),
            "http://localhost:3000/media/a.mp3"
        );
        assert_eq!(resolve_media_url("/media/a.mp3", None), "/media/a.mp3");
    }

    #[test]
    fn other_sources_unchanged() {
        assert_eq!(resolve_media_url("a.mp3", Some("http://h")), "a.mp3");
        assert_eq!(resolve_media_url("  ", Some("http://h")), "");
    }
}
