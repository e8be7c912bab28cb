//! Catalog server client.

use crate::error::{Result, ServerClientError};
use crate::types::{
    GraphQlRequest, GraphQlResponse, ServerConfig, TracksData, TracksVariables, TRACKS_QUERY,
};
use async_trait::async_trait;
use folio_core::{Track, TrackCatalog, TrackQuery};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the catalog server's GraphQL endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use folio_core::TrackQuery;
/// use folio_server_client::{FolioServerClient, ServerConfig};
///
/// let client = FolioServerClient::new(ServerConfig::new("http://localhost:4000"))?;
/// let tracks = client.fetch_tracks(&TrackQuery::search("miles")).await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Clone)]
pub struct FolioServerClient {
    http: Client,
    base_url: String,
}

impl FolioServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Folio/{} (Console)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        info!(url = %url, "Catalog client created");

        Ok(Self {
            http,
            base_url: url,
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// GraphQL endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    /// Fetch a page of tracks, optionally filtered by search term.
    pub async fn fetch_tracks(&self, query: &TrackQuery) -> Result<Vec<Track>> {
        let variables = TracksVariables {
            limit: query.limit,
            offset: query.offset,
            search: query.search.as_deref(),
        };

        let data: TracksData = self.execute("GetTracks", TRACKS_QUERY, variables).await?;

        debug!(
            tracks = data.tracks.len(),
            search = ?query.search,
            "Fetched tracks"
        );
        Ok(data.tracks)
    }

    async fn execute<V, T>(&self, operation: &str, query: &str, variables: V) -> Result<T>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let url = self.endpoint();
        debug!(url = %url, operation, "Sending GraphQL request");

        let body = GraphQlRequest {
            operation_name: operation,
            query,
            variables,
        };

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ServerClientError::ServerUnreachable(e.to_string())
            } else {
                ServerClientError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {operation} response: {e}"))
        })?;

        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ServerClientError::GraphQl(message));
        }

        envelope
            .data
            .ok_or_else(|| ServerClientError::ParseError(format!("{operation} returned no data")))
    }
}

#[async_trait]
impl TrackCatalog for FolioServerClient {
    async fn fetch_tracks(&self, query: &TrackQuery) -> folio_core::Result<Vec<Track>> {
        Ok(FolioServerClient::fetch_tracks(self, query).await?)
    }
}
