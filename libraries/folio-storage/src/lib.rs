//! Folio Storage
//!
//! `KeyValueStore` implementations used to persist player preferences.
//!
//! - [`MemoryStore`]: process-local map, for tests and ephemeral sessions
//! - [`JsonFileStore`]: a single JSON object on disk, rewritten on every `set`
//!
//! Writes are synchronous: the player saves on every preference change and
//! there is no shutdown hook guaranteed to run, so nothing is buffered.

mod error;
mod file;
mod memory;

pub use error::{Result, StorageError};
pub use file::{default_preferences_path, JsonFileStore};
pub use memory::MemoryStore;
