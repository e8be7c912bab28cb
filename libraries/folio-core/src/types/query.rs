/// Catalog query parameters
use serde::{Deserialize, Serialize};

/// Page size used when the caller does not specify one
pub const DEFAULT_FETCH_LIMIT: u32 = 100;

/// Parameters for one catalog fetch
///
/// The backend orders results newest first and matches `search`
/// case-insensitively against title and artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackQuery {
    /// Maximum number of tracks to return
    pub limit: u32,

    /// Number of tracks to skip
    pub offset: u32,

    /// Search text (trimmed, `None` when blank)
    pub search: Option<String>,
}

impl TrackQuery {
    /// Query for the first page with no search filter
    pub fn all() -> Self {
        Self {
            limit: DEFAULT_FETCH_LIMIT,
            offset: 0,
            search: None,
        }
    }

    /// Query for the first page filtered by `term`
    ///
    /// Blank terms produce an unfiltered query.
    pub fn search(term: &str) -> Self {
        Self::all().with_search(term)
    }

    /// Replace the search filter
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self
    }

    /// Replace the page window
    #[must_use]
    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

impl Default for TrackQuery {
    fn default() -> Self {
        Self::all()
    }
}
