//! Console session: a player plus the glue between commands, the simulated
//! output and printable output lines.

use crate::command::{Command, HELP};
use crate::output::SimulatedOutput;
use crate::render;
use folio_core::{KeyValueStore, Track};
use folio_playback::{FetchRequest, Player, PlayerConfig};
use std::time::{Duration, Instant};

/// What the host should do after a command
#[derive(Debug, Default, PartialEq)]
pub struct Reply {
    /// Lines to print
    pub lines: Vec<String>,
    /// Exit the loop
    pub quit: bool,
}

/// Player driven by console commands
pub struct Session<S: KeyValueStore> {
    player: Player<SimulatedOutput, S>,
    default_length: Duration,
}

impl<S: KeyValueStore> Session<S> {
    /// Create new session
    pub fn new(config: PlayerConfig, store: S, default_length: Duration) -> Self {
        Self {
            player: Player::new(config, SimulatedOutput::new(), store),
            default_length,
        }
    }

    /// Get the player
    pub fn player(&self) -> &Player<SimulatedOutput, S> {
        &self.player
    }

    /// Get the player mutably
    pub fn player_mut(&mut self) -> &mut Player<SimulatedOutput, S> {
        &mut self.player
    }

    /// Initial unfiltered catalog load
    pub fn start(&mut self) -> FetchRequest {
        self.player.refresh()
    }

    /// Per-frame work: feed simulated media events, then tick the player
    pub fn frame(&mut self, now: Instant) -> Option<FetchRequest> {
        let length = self.player.duration().unwrap_or(self.default_length);
        let events = self.player.output_mut().poll(now, length);
        for event in events {
            self.player.handle_media_event(event, now);
        }
        self.player.tick(now)
    }

    /// Deliver a completed fetch
    pub fn complete_fetch(&mut self, token: u64, result: folio_core::Result<Vec<Track>>) {
        self.player.complete_fetch(token, result);
    }

    /// Apply one command
    pub fn apply(&mut self, command: Command, now: Instant) -> Reply {
        let mut reply = Reply::default();
        let player = &mut self.player;

        match command {
            Command::Play(Some(index)) => {
                if index < player.tracks().len() {
                    player.play_index(index, now);
                } else {
                    reply.lines.push(format!("no track {}", index + 1));
                }
            }
            Command::Play(None) | Command::Toggle => player.toggle_play_pause(now),
            Command::Pause => player.pause(now),
            Command::Resume => player.resume(now),
            Command::Next => player.next(now),
            Command::Previous => player.previous(now),
            Command::Seek(position) => player.seek(position),
            Command::Volume(level) => player.set_volume(level),
            Command::Mute => player.toggle_mute(),
            Command::Shuffle => player.toggle_shuffle(now),
            Command::Repeat(None) => player.cycle_repeat(now),
            Command::Repeat(Some(mode)) => player.set_repeat(mode),
            Command::Search(term) => player.set_search_term(&term, now),
            Command::List => {
                reply.lines = render::track_lines(player.tracks(), player.selected_index());
            }
            Command::Status => reply.lines.push(render::status_line(&player.snapshot())),
            Command::Playlist => player.toggle_playlist(),
            Command::Minimize => player.toggle_minimized(),
            Command::Help => reply.lines.push(HELP.to_string()),
            Command::Quit => reply.quit = true,
        }

        reply
    }

    /// Drain player events into printable lines
    pub fn drain_lines(&mut self) -> Vec<String> {
        self.player
            .drain_events()
            .iter()
            .filter_map(render::describe_event)
            .collect()
    }

    /// Detach the output
    pub fn shutdown(&mut self) {
        self.player.shutdown();
    }
}
