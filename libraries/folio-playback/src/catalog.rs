//! Catalog store
//!
//! Holds the current track snapshot, the search term and its debounce, and
//! the fetch tokens that decide which response wins. Only the response to
//! the most recently initiated fetch is ever applied.

use crate::timer::Timer;
use crate::types::PlayerConfig;
use folio_core::{Track, TrackId, TrackQuery};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A fetch the host should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Token to hand back with the result
    pub token: u64,

    /// Query to run against the catalog backend
    pub query: TrackQuery,
}

/// What happened to a completed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Snapshot replaced
    Applied {
        /// Length of the previous snapshot
        previous_len: usize,
    },

    /// Latest fetch failed; snapshot kept, error flag set
    Failed(String),

    /// A newer fetch was initiated; result discarded
    Superseded,
}

/// Current catalog snapshot plus search/fetch bookkeeping
#[derive(Debug)]
pub struct CatalogStore {
    tracks: Vec<Track>,
    selected: Option<usize>,

    search_term: String,
    debounce: Timer,
    debounce_delay: Duration,
    fetch_limit: u32,

    latest_token: u64,
    loading: bool,
    error: Option<String>,
}

impl CatalogStore {
    /// Create an empty store
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            selected: None,
            search_term: String::new(),
            debounce: Timer::new(),
            debounce_delay: config.search_debounce(),
            fetch_limit: config.fetch_limit,
            latest_token: 0,
            loading: false,
            error: None,
        }
    }

    /// Record a new search term and restart the debounce
    pub fn set_search_term(&mut self, term: impl Into<String>, now: Instant) {
        self.search_term = term.into();
        self.debounce.schedule(now, self.debounce_delay);
    }

    /// Issue a fetch if the search debounce has expired
    pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
        self.debounce.fire(now).then(|| self.begin_fetch())
    }

    /// Issue a fetch for the current term right away
    ///
    /// Cancels any pending debounce.
    pub fn refresh(&mut self) -> FetchRequest {
        self.debounce.cancel();
        self.begin_fetch()
    }

    /// Apply a fetch result
    ///
    /// Results for anything but the latest token are discarded. On success
    /// the snapshot is replaced wholesale, the error flag cleared and the
    /// selection revalidated: it follows `remembered` if that track is still
    /// present, otherwise it is clamped into range.
    pub fn complete(
        &mut self,
        token: u64,
        result: folio_core::Result<Vec<Track>>,
        remembered: Option<&TrackId>,
    ) -> FetchOutcome {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "Discarding superseded fetch");
            return FetchOutcome::Superseded;
        }

        self.loading = false;

        match result {
            Ok(tracks) => {
                let previous_len = self.tracks.len();
                self.tracks = tracks;
                self.error = None;
                self.revalidate_selection(remembered);
                debug!(token, len = self.tracks.len(), "Catalog snapshot replaced");
                FetchOutcome::Applied { previous_len }
            }
            Err(e) => {
                let message = e.to_string();
                warn!(token, error = %message, "Catalog fetch failed");
                self.error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Current snapshot
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks in the snapshot
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Index of the track with this id
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Currently selected index
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Currently selected track
    pub fn selected_track(&self) -> Option<&Track> {
        self.selected.and_then(|i| self.tracks.get(i))
    }

    /// Select an index; out-of-range indices are rejected
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Current search term
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether the latest fetch is still outstanding
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sticky error from the latest failed fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Token of the most recently initiated fetch
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Pending debounce deadline
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_token += 1;
        self.loading = true;

        let query = TrackQuery::search(&self.search_term).with_page(self.fetch_limit, 0);
        debug!(token = self.latest_token, search = ?query.search, "Catalog fetch issued");

        FetchRequest {
            token: self.latest_token,
            query,
        }
    }

    fn revalidate_selection(&mut self, remembered: Option<&TrackId>) {
        if self.tracks.is_empty() {
            self.selected = None;
            return;
        }

        if let Some(index) = remembered.and_then(|id| self.position_of(id)) {
            self.selected = Some(index);
            return;
        }

        let last = self.tracks.len() - 1;
        self.selected = Some(self.selected.map_or(0, |i| i.min(last)));
    }
}
