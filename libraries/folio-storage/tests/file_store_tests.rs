//! Tests for the JSON file store

use folio_core::KeyValueStore;
use folio_storage::JsonFileStore;
use std::fs;
use tempfile::TempDir;

#[test]
fn missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("prefs.json")).unwrap();
    assert!(store.get("audio.volume").is_none());
}

#[test]
fn values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("audio.volume", "0.4").unwrap();
        store.set("playback.repeat", "all").unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    assert_eq!(store.get("audio.volume").as_deref(), Some("0.4"));
    assert_eq!(store.get("playback.repeat").as_deref(), Some("all"));
}

#[test]
fn every_set_is_written_immediately() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.set("playback.shuffle", "true").unwrap();

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("playback.shuffle"));
    assert!(!dir.path().join("prefs.json.tmp").exists());
}

#[test]
fn corrupt_file_is_treated_as_empty_and_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, "{not json").unwrap();

    let mut store = JsonFileStore::open(&path).unwrap();
    assert!(store.get("audio.volume").is_none());

    store.set("audio.volume", "0.9").unwrap();
    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.get("audio.volume").as_deref(), Some("0.9"));
}

#[test]
fn remove_deletes_key_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.set("player.last_track_id", "abc").unwrap();
    store.remove("player.last_track_id").unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    assert!(reopened.get("player.last_track_id").is_none());
}

#[test]
fn creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("prefs.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.set("ui.minimized", "false").unwrap();
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}
