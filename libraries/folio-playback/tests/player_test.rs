//! Integration tests for the player controller
//!
//! Drive the full controller through a mock output and in-memory store,
//! with time passed in explicitly.

mod common;

use common::{current_id, ms, player, player_with, start, tracks};
use folio_core::{FolioError, KeyValueStore, TrackId};
use folio_playback::preferences::keys;
use folio_playback::{MediaEvent, PlaybackState, PlayerEvent, PlayerPosition, RepeatMode};
use folio_storage::MemoryStore;
use std::collections::HashSet;
use std::time::Duration;

// ===== Play order scenarios =====

#[test]
fn linear_order_advances_then_stops() {
    let t0 = start();
    let (mut player, _log) = player(&["t1", "t2", "t3"]);

    player.play_index(0, t0);
    assert_eq!(player.selected_index(), Some(0));

    player.next(t0 + ms(1000));
    assert_eq!(player.selected_index(), Some(1));
    player.next(t0 + ms(2000));
    assert_eq!(player.selected_index(), Some(2));

    player.next(t0 + ms(3000));
    assert_eq!(player.selected_index(), Some(2));
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert!(!player.is_playing());
}

#[test]
fn repeat_all_wraps_to_first() {
    let t0 = start();
    let (mut player, _log) = player(&["t1", "t2", "t3"]);
    player.set_repeat(RepeatMode::All);

    player.play_index(2, t0);
    player.next(t0 + ms(500));

    assert_eq!(player.selected_index(), Some(0));
    assert_eq!(current_id(&player), "t1");
    assert!(player.is_playing());
}

#[test]
fn ended_advances_automatically() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2"]);

    player.play_index(0, t0);
    player.handle_media_event(MediaEvent::Ended, t0 + ms(5000));

    assert_eq!(current_id(&player), "t2");
    assert_eq!(log.borrow().loads, 2);
    assert_eq!(log.borrow().source.as_deref(), Some("/media/t2.mp3"));
}

#[test]
fn ended_with_repeat_one_restarts_same_track() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2", "t3"]);
    player.set_repeat(RepeatMode::One);

    player.play_index(1, t0);
    player.handle_media_event(MediaEvent::TimeUpdate(Duration::from_secs(199)), t0 + ms(100));
    player.handle_media_event(MediaEvent::Ended, t0 + ms(200));

    assert_eq!(current_id(&player), "t2");
    assert_eq!(player.position(), Duration::ZERO);
    assert!(player.is_playing());

    let log = log.borrow();
    assert_eq!(log.loads, 1);
    assert_eq!(log.ops.last().map(String::as_str), Some("play"));
    assert!(log.ops.contains(&"seek 0".to_string()));
}

#[test]
fn ended_at_last_track_stops_then_toggle_restarts() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2"]);

    player.play_index(1, t0);
    player.handle_media_event(MediaEvent::Ended, t0 + ms(100));
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert!(!log.borrow().playing);

    player.toggle_play_pause(t0 + ms(200));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(current_id(&player), "t2");
    assert_eq!(player.position(), Duration::ZERO);
}

#[test]
fn previous_clamps_without_repeat() {
    let t0 = start();
    let (mut player, _log) = player(&["t1", "t2", "t3"]);

    player.play_index(0, t0);
    player.previous(t0 + ms(10));
    assert_eq!(player.selected_index(), Some(0));

    player.set_repeat(RepeatMode::All);
    player.previous(t0 + ms(20));
    assert_eq!(player.selected_index(), Some(2));
}

#[test]
fn next_on_empty_catalog_is_noop() {
    let t0 = start();
    let (mut player, log) = player(&[]);

    player.next(t0);
    player.previous(t0);
    player.toggle_play_pause(t0);

    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(log.borrow().loads, 0);
}

// ===== Shuffle =====

#[test]
fn enabling_shuffle_keeps_current_track() {
    let t0 = start();
    let (mut player, _log) = player(&["t1", "t2", "t3", "t4", "t5"]);

    player.play_index(2, t0);
    player.toggle_shuffle(t0 + ms(10));

    assert!(player.shuffle());
    assert_eq!(player.shuffle_order()[0], 2);
    assert_eq!(current_id(&player), "t3");
    assert_eq!(player.notification(), Some("Shuffle: ON"));

    let unique: HashSet<usize> = player.shuffle_order().iter().copied().collect();
    assert_eq!(unique.len(), 5);
}

#[test]
fn shuffled_repeat_all_visits_every_track() {
    let t0 = start();
    let (mut player, _log) = player(&["a", "b", "c", "d", "e", "f"]);
    player.set_repeat(RepeatMode::All);
    player.play_index(0, t0);
    player.set_shuffle(true);

    let mut seen = HashSet::new();
    seen.insert(current_id(&player));
    for step in 1..6u64 {
        player.next(t0 + ms(step * 100));
        seen.insert(current_id(&player));
    }
    assert_eq!(seen.len(), 6);

    player.next(t0 + ms(1000));
    assert_eq!(current_id(&player), "a");
}

#[test]
fn shuffle_order_regenerates_when_catalog_size_changes() {
    let t0 = start();
    let (mut player, _log) = player(&["t1", "t2", "t3", "t4"]);
    player.toggle_shuffle(t0);
    assert_eq!(player.shuffle_order().len(), 4);

    let request = player.refresh();
    player.complete_fetch(request.token, Ok(tracks(&["t1", "t2"])));
    assert_eq!(player.shuffle_order().len(), 2);

    player.toggle_shuffle(t0 + ms(10));
    assert!(player.shuffle_order().is_empty());
    assert_eq!(player.notification(), Some("Shuffle: OFF"));
}

#[test]
fn repeat_cycles_with_notifications() {
    let t0 = start();
    let (mut player, _log) = player(&["t1"]);

    player.cycle_repeat(t0);
    assert_eq!(player.repeat(), RepeatMode::All);
    assert_eq!(player.notification(), Some("Repeat: ALL"));

    player.cycle_repeat(t0);
    assert_eq!(player.notification(), Some("Repeat: ONE"));

    player.cycle_repeat(t0);
    assert_eq!(player.repeat(), RepeatMode::Off);
    assert_eq!(player.notification(), Some("Repeat: OFF"));
    assert_eq!(player.store().get(keys::REPEAT).as_deref(), Some("off"));
}

// ===== Search and fetch =====

#[test]
fn rapid_search_terms_collapse_into_one_fetch() {
    let t0 = start();
    let (mut player, _log) = player(&["t1"]);

    player.set_search_term("jazz", t0);
    player.set_search_term("jazz fusion", t0 + ms(80));

    let mut requests = Vec::new();
    for frame in 0..100u64 {
        if let Some(request) = player.tick(t0 + ms(frame * 16)) {
            requests.push(request);
        }
    }

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query.search.as_deref(), Some("jazz fusion"));
    assert!(player.is_loading());
}

#[test]
fn three_keystrokes_issue_single_fetch() {
    let t0 = start();
    let (mut player, _log) = player(&[]);

    player.set_search_term("a", t0);
    player.set_search_term("ab", t0 + ms(100));
    player.set_search_term("abc", t0 + ms(200));

    assert!(player.tick(t0 + ms(499)).is_none());
    let request = player.tick(t0 + ms(500)).unwrap();
    assert_eq!(request.query.search.as_deref(), Some("abc"));
    assert!(player.tick(t0 + ms(2000)).is_none());
}

#[test]
fn late_response_to_older_fetch_is_ignored() {
    let t0 = start();
    let (mut player, _log) = player(&[]);

    player.set_search_term("x", t0);
    let a = player.tick(t0 + ms(300)).unwrap();
    player.set_search_term("y", t0 + ms(400));
    let b = player.tick(t0 + ms(700)).unwrap();

    player.complete_fetch(b.token, Ok(tracks(&["y1"])));
    player.complete_fetch(a.token, Ok(tracks(&["x1", "x2"])));

    assert_eq!(player.tracks().len(), 1);
    assert_eq!(player.tracks()[0].id, "y1");
    assert!(!player.is_loading());
}

#[test]
fn fetch_error_is_sticky_and_keeps_snapshot() {
    let (mut player, _log) = player(&["t1", "t2"]);

    let request = player.refresh();
    player.complete_fetch(request.token, Err(FolioError::network("connection refused")));

    assert_eq!(player.tracks().len(), 2);
    assert!(player.catalog_error().unwrap().contains("connection refused"));
    assert!(player.snapshot().catalog_error.is_some());

    let request = player.refresh();
    player.complete_fetch(request.token, Ok(tracks(&["t3"])));
    assert!(player.catalog_error().is_none());
}

#[test]
fn refetch_follows_playing_track_by_id() {
    let t0 = start();
    let (mut player, _log) = player(&["t1", "t2", "t3"]);
    player.play_index(1, t0);

    let request = player.refresh();
    player.complete_fetch(request.token, Ok(tracks(&["t2", "t9"])));

    assert_eq!(player.selected_index(), Some(0));
}

#[test]
fn playing_track_survives_disappearing_from_results() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2", "t3"]);
    player.play_index(2, t0);

    let request = player.refresh();
    player.complete_fetch(request.token, Ok(tracks(&["t1", "t2"])));

    assert_eq!(player.selected_index(), Some(1));
    assert_eq!(current_id(&player), "t3");
    assert!(player.is_playing());
    assert_eq!(log.borrow().source.as_deref(), Some("/media/t3.mp3"));
}

// ===== Transport and fades =====

#[test]
fn switching_tracks_mid_fade_leaves_single_source() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2"]);

    player.play_index(0, t0);
    player.tick(t0 + ms(50));
    assert!(log.borrow().volume > 0.0);

    player.play_index(1, t0 + ms(60));
    {
        let log = log.borrow();
        assert_eq!(log.source.as_deref(), Some("/media/t2.mp3"));
        assert_eq!(log.max_attached, 1);
        assert_eq!(log.volume, 0.0);

        let unload = log.ops.iter().rposition(|op| op == "unload").unwrap();
        let load = log.ops.iter().rposition(|op| op.starts_with("load")).unwrap();
        assert!(unload < load);
    }

    player.tick(t0 + ms(160));
    assert!((log.borrow().volume - 0.35).abs() < 0.01);

    player.tick(t0 + ms(260));
    assert!((log.borrow().volume - 0.7).abs() < 0.001);
    assert_eq!(current_id(&player), "t2");
}

#[test]
fn pause_and_resume_fade() {
    let t0 = start();
    let (mut player, log) = player(&["t1"]);

    player.play_index(0, t0);
    player.tick(t0 + ms(200));

    player.toggle_play_pause(t0 + ms(1000));
    assert_eq!(player.state(), PlaybackState::Paused);
    assert!(log.borrow().playing);

    player.tick(t0 + ms(1200));
    assert!(!log.borrow().playing);
    assert_eq!(log.borrow().volume, 0.0);

    player.toggle_play_pause(t0 + ms(2000));
    assert!(player.is_playing());
    assert_eq!(log.borrow().volume, 0.0);

    player.tick(t0 + ms(2200));
    assert!((log.borrow().volume - 0.7).abs() < 0.001);
}

#[test]
fn mute_during_pause_fade_silences_output() {
    let t0 = start();
    let (mut player, log) = player(&["t1"]);
    player.play_index(0, t0);
    player.tick(t0 + ms(300));

    player.pause(t0 + ms(1000));
    player.tick(t0 + ms(1020));
    assert!(log.borrow().volume > 0.0);

    player.toggle_mute();
    assert_eq!(log.borrow().volume, 0.0);

    player.tick(t0 + ms(1050));
    assert_eq!(log.borrow().volume, 0.0);

    player.tick(t0 + ms(1300));
    assert_eq!(log.borrow().volume, 0.0);
    assert!(!log.borrow().playing);
    assert_eq!(player.state(), PlaybackState::Paused);
}

#[test]
fn ended_during_pause_fade_advances_on_resume() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2"]);
    player.play_index(0, t0);
    player.tick(t0 + ms(300));

    player.pause(t0 + ms(1000));
    player.handle_media_event(MediaEvent::Ended, t0 + ms(1050));

    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.selected_index(), Some(0));
    assert!(!log.borrow().playing);

    player.resume(t0 + ms(2000));

    assert!(player.is_playing());
    assert_eq!(current_id(&player), "t2");
    assert_eq!(log.borrow().source.as_deref(), Some("/media/t2.mp3"));
}

#[test]
fn ended_during_pause_fade_with_repeat_one_restarts() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2"]);
    player.set_repeat(RepeatMode::One);
    player.play_index(0, t0);

    player.pause(t0 + ms(1000));
    player.handle_media_event(MediaEvent::Ended, t0 + ms(1050));
    player.resume(t0 + ms(2000));

    assert!(player.is_playing());
    assert_eq!(current_id(&player), "t1");
    assert_eq!(player.position(), Duration::ZERO);
    assert_eq!(log.borrow().loads, 1);
}

#[test]
fn toggle_with_nothing_loaded_plays_selected() {
    let t0 = start();
    let (mut player, log) = player(&["t1", "t2"]);

    player.toggle_play_pause(t0);

    assert!(player.is_playing());
    assert_eq!(current_id(&player), "t1");
    assert_eq!(log.borrow().loads, 1);
}

#[test]
fn rejected_playback_is_reported_not_raised() {
    let t0 = start();
    let (mut player, log) = player(&["t1"]);
    log.borrow_mut().reject_play = true;

    player.play_index(0, t0);

    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(!player.is_playing());
    assert!(player.notification().unwrap().starts_with("Playback failed"));
    assert!(player.store().get(keys::LAST_TRACK_ID).is_none());
    assert!(player
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlayerEvent::PlaybackError { .. })));
}

#[test]
fn media_error_goes_idle_with_notification() {
    let t0 = start();
    let (mut player, log) = player(&["t1"]);
    player.play_index(0, t0);

    player.handle_media_event(MediaEvent::Error("network".into()), t0 + ms(10));

    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(log.borrow().source.is_none());
    assert_eq!(player.notification(), Some("Playback failed: network"));
}

#[test]
fn seek_is_clamped_to_duration() {
    let t0 = start();
    let (mut player, log) = player(&["t1"]);
    player.play_index(0, t0);

    player.seek(Duration::from_secs(500));
    assert_eq!(player.position(), Duration::from_secs(200));

    player.seek_to_fraction(0.5);
    assert_eq!(player.position(), Duration::from_secs(100));
    assert_eq!(log.borrow().position, Duration::from_secs(100));
    assert!((player.progress_percent() - 50.0).abs() < 0.01);
}

#[test]
fn duration_change_overrides_hint() {
    let t0 = start();
    let (mut player, _log) = player(&["t1"]);
    player.play_index(0, t0);

    player.handle_media_event(MediaEvent::DurationChange(Duration::from_secs(90)), t0);
    player.seek(Duration::from_secs(120));

    assert_eq!(player.duration(), Some(Duration::from_secs(90)));
    assert_eq!(player.position(), Duration::from_secs(90));
}

// ===== Volume =====

#[test]
fn volume_change_while_muted_applies_on_unmute() {
    let t0 = start();
    let (mut player, log) = player(&["t1"]);
    player.play_index(0, t0);
    player.tick(t0 + ms(300));

    player.toggle_mute();
    assert_eq!(log.borrow().volume, 0.0);

    player.set_volume(0.4);
    assert_eq!(log.borrow().volume, 0.0);
    assert!(player.is_muted());

    player.toggle_mute();
    assert_eq!(log.borrow().volume, 0.4);
}

#[test]
fn volume_is_clamped_and_persisted() {
    let (mut player, _log) = player(&["t1"]);

    player.set_volume(1.7);
    assert_eq!(player.volume(), 1.0);
    assert_eq!(player.store().get(keys::VOLUME).as_deref(), Some("1"));

    player.set_volume(f32::NAN);
    assert_eq!(player.volume(), 1.0);
}

// ===== Preferences =====

#[test]
fn preferences_restore_at_startup() {
    let store = MemoryStore::with_entries([
        (keys::VOLUME, "0.4"),
        (keys::SHUFFLE, "true"),
        (keys::REPEAT, "all"),
        (keys::LAST_TRACK_ID, "t3"),
    ]);
    let (player, log) = player_with(&["t1", "t2", "t3"], store);

    assert_eq!(player.volume(), 0.4);
    assert_eq!(log.borrow().volume, 0.4);
    assert!(player.shuffle());
    assert_eq!(player.repeat(), RepeatMode::All);
    assert_eq!(player.selected_index(), Some(2));
    assert_eq!(player.shuffle_order().first(), Some(&2));
    assert_eq!(player.state(), PlaybackState::Idle);
}

#[test]
fn last_track_is_persisted_on_successful_start() {
    let t0 = start();
    let (mut player, _log) = player(&["t1", "t2"]);

    player.play_track(&TrackId::new("t2"), t0);

    assert_eq!(player.store().get(keys::LAST_TRACK_ID).as_deref(), Some("t2"));
    assert_eq!(player.notification(), Some("Playing: Song t2"));
}

#[test]
fn minimizing_hides_playlist() {
    let (mut player, _log) = player(&["t1"]);

    player.set_playlist_visible(true);
    player.toggle_minimized();

    let prefs = player.preferences();
    assert!(prefs.minimized);
    assert!(!prefs.playlist_visible);
    assert_eq!(player.store().get(keys::PLAYLIST_VISIBLE).as_deref(), Some("false"));

    player.set_position(Some(PlayerPosition { x: 12.0, y: 40.0 }));
    assert_eq!(player.snapshot().position, Some(PlayerPosition { x: 12.0, y: 40.0 }));
}

// ===== Notifications, events, lifecycle =====

#[test]
fn notification_clears_after_display_time() {
    let t0 = start();
    let (mut player, _log) = player(&["t1"]);

    player.notify("hello", t0);
    player.tick(t0 + ms(1499));
    assert_eq!(player.notification(), Some("hello"));

    player.drain_events();
    player.tick(t0 + ms(1500));
    assert_eq!(player.notification(), None);
    assert!(player
        .drain_events()
        .contains(&PlayerEvent::Notification { message: None }));
}

#[test]
fn play_emits_state_track_and_notification_events() {
    let t0 = start();
    let (mut player, _log) = player(&["t1"]);

    player.play_index(0, t0);
    let events = player.drain_events();

    assert!(events.contains(&PlayerEvent::StateChanged {
        state: PlaybackState::Loading
    }));
    assert!(events.contains(&PlayerEvent::StateChanged {
        state: PlaybackState::Playing
    }));
    assert!(events.iter().any(|e| matches!(
        e,
        PlayerEvent::TrackChanged { track_id, previous_track_id: None } if track_id == "t1"
    )));
    assert!(player.drain_events().is_empty());
}

#[test]
fn snapshot_serializes_for_ui() {
    let t0 = start();
    let (mut player, _log) = player(&["t1"]);
    player.play_index(0, t0);

    let snapshot = player.snapshot();
    assert_eq!(snapshot.elapsed_label(), "0:00");
    assert_eq!(snapshot.duration_label(), "3:20");

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["state"], "playing");
    assert_eq!(json["currentTrack"]["id"], "t1");
    assert_eq!(json["trackCount"], 1);
}

#[test]
fn shutdown_detaches_output() {
    let t0 = start();
    let (mut player, log) = player(&["t1"]);
    player.play_index(0, t0);

    player.shutdown();

    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(log.borrow().source.is_none());
    assert!(!log.borrow().playing);
}
