//! Console command parsing

use folio_playback::RepeatMode;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Play the listed track (1-based), or toggle when omitted
    Play(Option<usize>),
    /// Pause with fade-out
    Pause,
    /// Resume with fade-in
    Resume,
    /// Toggle play/pause
    Toggle,
    /// Next track
    Next,
    /// Previous track
    Previous,
    /// Seek to an absolute position
    Seek(Duration),
    /// Set volume (0.0-1.0)
    Volume(f32),
    /// Toggle mute
    Mute,
    /// Toggle shuffle
    Shuffle,
    /// Cycle repeat, or set it explicitly
    Repeat(Option<RepeatMode>),
    /// Set the search term (empty clears it)
    Search(String),
    /// Show the catalog
    List,
    /// Show player status
    Status,
    /// Toggle the playlist panel preference
    Playlist,
    /// Toggle minimized preference
    Minimize,
    /// Show help
    Help,
    /// Exit
    Quit,
}

/// Input that is not a valid command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    #[error("empty command")]
    Empty,

    /// First word not recognised
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    /// Argument missing or malformed
    #[error("invalid argument for {command}: {reason}")]
    InvalidArgument {
        /// Command name
        command: &'static str,
        /// What was wrong
        reason: String,
    },
}

/// Help text listing every command
pub const HELP: &str = "\
commands:
  play [n]        play track n from the list (or toggle)
  pause | resume  pause or resume with a fade
  toggle          toggle play/pause
  next | prev     skip forward or back
  seek <m:ss|s>   jump within the current track
  volume <0..1>   set volume
  mute            toggle mute
  shuffle         toggle shuffle
  repeat [mode]   cycle repeat, or set off|all|one
  search <term>   filter the catalog (empty clears)
  list            show the catalog
  status          show player status
  playlist        toggle the playlist panel
  minimize        toggle minimized
  quit            exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "play" | "p" => Command::Play(parse_index(rest)?),
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "toggle" | "t" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "seek" => Command::Seek(parse_time(rest)?),
            "volume" | "vol" | "v" => Command::Volume(parse_volume(rest)?),
            "mute" | "m" => Command::Mute,
            "shuffle" | "s" => Command::Shuffle,
            "repeat" | "r" => Command::Repeat(parse_repeat(rest)?),
            "search" | "/" => Command::Search(rest.to_string()),
            "list" | "ls" => Command::List,
            "status" => Command::Status,
            "playlist" => Command::Playlist,
            "minimize" => Command::Minimize,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn parse_index(arg: &str) -> Result<Option<usize>, CommandError> {
    if arg.is_empty() {
        return Ok(None);
    }

    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n - 1)),
        _ => Err(CommandError::InvalidArgument {
            command: "play",
            reason: format!("expected a track number, got {arg:?}"),
        }),
    }
}

/// Accepts plain seconds ("95") or "m:ss" ("1:35")
fn parse_time(arg: &str) -> Result<Duration, CommandError> {
    let invalid = || CommandError::InvalidArgument {
        command: "seek",
        reason: format!("expected seconds or m:ss, got {arg:?}"),
    };

    let seconds = match arg.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
            let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(invalid());
            }
            minutes * 60 + seconds
        }
        None => arg.parse().map_err(|_| invalid())?,
    };

    Ok(Duration::from_secs(seconds))
}

fn parse_volume(arg: &str) -> Result<f32, CommandError> {
    arg.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidArgument {
            command: "volume",
            reason: format!("expected a number between 0 and 1, got {arg:?}"),
        })
}

fn parse_repeat(arg: &str) -> Result<Option<RepeatMode>, CommandError> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.to_ascii_lowercase()
        .parse()
        .map(Some)
        .map_err(|reason| CommandError::InvalidArgument {
            command: "repeat",
            reason,
        })
}
