/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One playable media item
///
/// Tracks are created, updated and deleted only by the catalog backend.
/// Player code treats them as immutable values for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Playable media URL (absolute, or relative to the media server)
    pub src: String,

    /// Cover image URL
    #[serde(default)]
    pub cover: Option<String>,

    /// Known duration in whole seconds (display hint only)
    #[serde(default)]
    pub duration_seconds: Option<u32>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Track {
    /// Create a track with the required fields
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            src: src.into(),
            cover: None,
            duration_seconds: None,
            tags: Vec::new(),
        }
    }

    /// Attach a cover image
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Attach a duration hint
    #[must_use]
    pub fn with_duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Attach tags
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Get the duration hint as a Duration
    pub fn duration_hint(&self) -> Option<Duration> {
        self.duration_seconds.map(|s| Duration::from_secs(u64::from(s)))
    }

    /// Case-insensitive substring match against title and artist
    ///
    /// A blank term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term) || self.artist.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{
            "id": "665f1c",
            "title": "So What",
            "artist": "Miles Davis",
            "src": "/uploads/so-what.mp3",
            "cover": null,
            "durationSeconds": 562,
            "tags": ["jazz", "modal"],
            "createdAt": "1717500000000"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "665f1c");
        assert_eq!(track.duration_seconds, Some(562));
        assert_eq!(track.tags, vec!["jazz", "modal"]);
        assert!(track.cover.is_none());
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let json = r#"{"id":"a","title":"T","artist":"A","src":"http://x/a.mp3"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert!(track.tags.is_empty());
        assert!(track.duration_hint().is_none());
    }

    #[test]
    fn search_matches_title_or_artist_ignoring_case() {
        let track = Track::new("1", "Spain", "Chick Corea", "/spain.mp3");
        assert!(track.matches_search("spa"));
        assert!(track.matches_search("COREA"));
        assert!(track.matches_search("  "));
        assert!(!track.matches_search("fusion"));
    }

    #[test]
    fn duration_hint_converts_seconds() {
        let track = Track::new("1", "T", "A", "/a.mp3").with_duration_seconds(90);
        assert_eq!(track.duration_hint(), Some(Duration::from_secs(90)));
    }
}
