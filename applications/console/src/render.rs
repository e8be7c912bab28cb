//! Plain-text rendering of player state

use folio_core::Track;
use folio_playback::{format_time, PlaybackState, PlayerEvent, PlayerSnapshot};

/// One-line status summary
pub fn status_line(snapshot: &PlayerSnapshot) -> String {
    let track = snapshot
        .current_track
        .as_ref()
        .map_or_else(|| "nothing selected".to_string(), describe_track);

    let state = match snapshot.state {
        PlaybackState::Idle => "idle",
        PlaybackState::Loading => "loading",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
        PlaybackState::Stopped => "stopped",
    };

    let volume = if snapshot.is_muted {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", snapshot.volume * 100.0)
    };

    let mut line = format!(
        "[{state}] {track}  {}/{}  {volume}  shuffle {}  repeat {}",
        snapshot.elapsed_label(),
        snapshot.duration_label(),
        if snapshot.shuffle { "on" } else { "off" },
        snapshot.repeat,
    );

    if snapshot.loading {
        line.push_str("  (loading)");
    }
    if let Some(error) = &snapshot.catalog_error {
        line.push_str(&format!("  ! {error}"));
    }
    line
}

/// Numbered catalog listing, marking the selected row
pub fn track_lines(tracks: &[Track], selected: Option<usize>) -> Vec<String> {
    if tracks.is_empty() {
        return vec!["(no tracks)".to_string()];
    }

    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if Some(i) == selected { '>' } else { ' ' };
            let length = track
                .duration_hint()
                .map(format_time)
                .unwrap_or_else(|| "-:--".to_string());
            format!("{marker}{:>3}. {}  [{length}]", i + 1, describe_track(track))
        })
        .collect()
}

/// Line to print for an event, if it is worth showing
pub fn describe_event(event: &PlayerEvent) -> Option<String> {
    match event {
        PlayerEvent::Notification { message: Some(message) } => Some(format!("* {message}")),
        PlayerEvent::PlaybackError { message } => Some(format!("! playback error: {message}")),
        PlayerEvent::CatalogError { message } => Some(format!("! catalog error: {message}")),
        PlayerEvent::CatalogChanged { len, .. } => Some(format!("catalog: {len} tracks")),
        PlayerEvent::StateChanged {
            state: PlaybackState::Stopped,
        } => Some("end of playlist".to_string()),
        PlayerEvent::VolumeChanged { volume, is_muted } => Some(if *is_muted {
            "volume: muted".to_string()
        } else {
            format!("volume: {:.0}%", volume * 100.0)
        }),
        _ => None,
    }
}

fn describe_track(track: &Track) -> String {
    format!("{} - {}", track.artist, track.title)
}
