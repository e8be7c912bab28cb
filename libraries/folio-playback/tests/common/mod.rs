//! Shared helpers for player integration tests

#![allow(dead_code)]

use folio_core::Track;
use folio_playback::{AudioOutput, Player, PlayerConfig, PlaybackError};
use folio_storage::MemoryStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Everything the mock output has been asked to do
#[derive(Debug, Default)]
pub struct OutputLog {
    pub ops: Vec<String>,
    pub source: Option<String>,
    pub playing: bool,
    pub volume: f32,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub loads: usize,
    pub reject_play: bool,
    /// Highest number of sources attached at the same time
    pub max_attached: usize,
}

/// Mock output sharing its log with the test body
#[derive(Clone, Default)]
pub struct MockOutput {
    pub log: Rc<RefCell<OutputLog>>,
}

impl AudioOutput for MockOutput {
    fn load(&mut self, url: &str) -> folio_playback::Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push(format!("load {url}"));
        let attached = usize::from(log.source.is_some()) + 1;
        log.max_attached = log.max_attached.max(attached);
        log.source = Some(url.to_string());
        log.position = Duration::ZERO;
        log.loads += 1;
        Ok(())
    }

    fn play(&mut self) -> folio_playback::Result<()> {
        let mut log = self.log.borrow_mut();
        log.ops.push("play".into());
        if log.reject_play {
            return Err(PlaybackError::PlayRejected("autoplay blocked".into()));
        }
        log.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut log = self.log.borrow_mut();
        log.ops.push("pause".into());
        log.playing = false;
    }

    fn unload(&mut self) {
        let mut log = self.log.borrow_mut();
        log.ops.push("unload".into());
        log.source = None;
        log.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        let mut log = self.log.borrow_mut();
        log.ops.push(format!("seek {}", position.as_secs()));
        log.position = position;
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.borrow_mut().volume = volume;
    }

    fn volume(&self) -> f32 {
        self.log.borrow().volume
    }

    fn position(&self) -> Duration {
        self.log.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.log.borrow().duration
    }
}

pub type TestPlayer = Player<MockOutput, MemoryStore>;

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub fn track(id: &str) -> Track {
    Track::new(id, format!("Song {id}"), "Artist", format!("/media/{id}.mp3"))
        .with_duration_seconds(200)
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

/// Player over a fresh store, seeded RNG, with `catalog` already loaded
pub fn player_with(catalog: &[&str], store: MemoryStore) -> (TestPlayer, Rc<RefCell<OutputLog>>) {
    let output = MockOutput::default();
    let log = Rc::clone(&output.log);
    let mut player = Player::with_rng(
        PlayerConfig::default(),
        output,
        store,
        StdRng::seed_from_u64(42),
    );

    let request = player.refresh();
    player.complete_fetch(request.token, Ok(tracks(catalog)));
    player.drain_events();

    (player, log)
}

pub fn player(catalog: &[&str]) -> (TestPlayer, Rc<RefCell<OutputLog>>) {
    player_with(catalog, MemoryStore::new())
}

pub fn current_id(player: &TestPlayer) -> String {
    player
        .current_track()
        .map(|t| t.id.as_str().to_string())
        .unwrap_or_default()
}

pub fn start() -> Instant {
    Instant::now()
}
