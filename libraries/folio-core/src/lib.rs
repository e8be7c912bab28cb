//! Folio Core
//!
//! Value types and collaborator contracts shared by the folio player crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `TrackQuery`
//! - **Collaborator Traits**: `TrackCatalog` (remote track listing) and
//!   `KeyValueStore` (durable string storage)
//! - **Error Handling**: unified `FolioError` and `Result` types
//!
//! Nothing here performs I/O on its own. Implementations live in
//! `folio-server-client` (catalog) and `folio-storage` (key/value).
//!
//! # Example
//!
//! ```rust
//! use folio_core::{Track, TrackQuery};
//!
//! let track = Track::new("t1", "Blue in Green", "Miles Davis", "/media/blue.mp3")
//!     .with_duration_seconds(337);
//!
//! let query = TrackQuery::search("  miles ");
//! assert_eq!(query.search.as_deref(), Some("miles"));
//! assert!(track.matches_search("MILES"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

pub use catalog::{StaticCatalog, TrackCatalog};
pub use error::{FolioError, Result};
pub use traits::KeyValueStore;
pub use types::{Track, TrackId, TrackQuery};
