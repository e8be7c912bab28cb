//! Folio Server Client
//!
//! HTTP client for the folio catalog server's GraphQL API.
//!
//! # Features
//!
//! - **Track listing**: paged `tracks(limit, offset, search)` queries
//! - Implements [`folio_core::TrackCatalog`] so the console host can swap it
//!   for an offline catalog
//!
//! # Example
//!
//! ```ignore
//! use folio_core::TrackQuery;
//! use folio_server_client::{FolioServerClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FolioServerClient::new(ServerConfig::new("http://localhost:4000"))?;
//!     let tracks = client.fetch_tracks(&TrackQuery::all()).await?;
//!     println!("Found {} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::FolioServerClient;
pub use error::{Result, ServerClientError};
pub use types::ServerConfig;
