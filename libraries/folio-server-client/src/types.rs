//! GraphQL request and response shapes.

use folio_core::Track;
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a catalog server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
}

impl ServerConfig {
    /// Create a new server config.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Tracks listing query.
pub(crate) const TRACKS_QUERY: &str = "query GetTracks($limit: Int, $offset: Int, $search: String) { \
tracks(limit: $limit, offset: $offset, search: $search) { id title artist src cover durationSeconds tags } }";

/// GraphQL request envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlRequest<'a, V> {
    pub operation_name: &'a str,
    pub query: &'a str,
    pub variables: V,
}

/// Variables for the tracks query.
#[derive(Debug, Serialize)]
pub(crate) struct TracksVariables<'a> {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

/// `data` payload of the tracks query.
#[derive(Debug, Deserialize)]
pub(crate) struct TracksData {
    pub tracks: Vec<Track>,
}
