//! Built-in catalog for offline mode

use folio_core::{StaticCatalog, Track};

/// Demo tracks, newest first
pub fn demo_tracks() -> Vec<Track> {
    vec![
        Track::new("demo-5", "Blue in Green", "Miles Davis", "/media/blue-in-green.mp3")
            .with_duration_seconds(337)
            .with_tags(["jazz", "modal"]),
        Track::new("demo-4", "Naima", "John Coltrane", "/media/naima.mp3")
            .with_duration_seconds(261)
            .with_tags(["jazz", "ballad"]),
        Track::new("demo-3", "Peace Piece", "Bill Evans", "/media/peace-piece.mp3")
            .with_duration_seconds(402)
            .with_tags(["jazz", "piano"]),
        Track::new("demo-2", "Take Five", "Dave Brubeck", "/media/take-five.mp3")
            .with_duration_seconds(324)
            .with_tags(["jazz"]),
        Track::new("demo-1", "Watermelon Man", "Herbie Hancock", "/media/watermelon-man.mp3")
            .with_tags(["jazz", "funk"]),
    ]
}

/// Offline catalog over [`demo_tracks`]
pub fn demo_catalog() -> StaticCatalog {
    StaticCatalog::new(demo_tracks())
}
