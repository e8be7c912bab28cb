//! Track catalog collaborator

use crate::error::Result;
use crate::types::{Track, TrackQuery};
use async_trait::async_trait;
use tracing::debug;

/// Remote source of tracks
///
/// Implementations return tracks newest first, filtered by a case-insensitive
/// substring match on title/artist when `query.search` is set. Failures are
/// returned as errors; callers decide how to surface them.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Fetch one page of tracks
    async fn fetch_tracks(&self, query: &TrackQuery) -> Result<Vec<Track>>;
}

/// In-memory catalog over a fixed track list
///
/// The list is assumed to already be in newest-first order. Used by the
/// console host in offline mode and by tests that need a real collaborator.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tracks: Vec<Track>,
}

impl StaticCatalog {
    /// Create a catalog over `tracks`
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Number of tracks held
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog holds no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Apply `query` synchronously
    pub fn query(&self, query: &TrackQuery) -> Vec<Track> {
        let term = query.search.as_deref().unwrap_or("");
        self.tracks
            .iter()
            .filter(|track| track.matches_search(term))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TrackCatalog for StaticCatalog {
    async fn fetch_tracks(&self, query: &TrackQuery) -> Result<Vec<Track>> {
        let tracks = self.query(query);
        debug!(
            search = ?query.search,
            returned = tracks.len(),
            "Served tracks from static catalog"
        );
        Ok(tracks)
    }
}
