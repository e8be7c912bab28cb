//! Domain types shared across folio crates

mod ids;
mod query;
mod track;

pub use ids::TrackId;
pub use query::{TrackQuery, DEFAULT_FETCH_LIMIT};
pub use track::Track;
