//! JSON file backed key/value store

use crate::error::{Result as StorageResult, StorageError};
use folio_core::{KeyValueStore, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "folio";
const FILE_NAME: &str = "preferences.json";

/// Default location of the preferences file
///
/// `<config_local_dir>/folio/preferences.json`
///
/// # Errors
/// Returns `StorageError::NoConfigDir` if the platform has no config directory
pub fn default_preferences_path() -> StorageResult<PathBuf> {
    dirs::config_local_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or(StorageError::NoConfigDir)
}

/// Key/value store persisted as one flat JSON object
///
/// The whole object is loaded on open and rewritten on every mutation via a
/// sibling temp file and rename, so a crash mid-write leaves the previous
/// file intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// logged and treated as empty; it is replaced on the next write.
    ///
    /// # Errors
    /// Returns an error only if the parent directory cannot be created
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Preferences file is corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Preferences file unreadable, starting empty");
                BTreeMap::new()
            }
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened preferences file");

        Ok(Self { path, entries })
    }

    /// Open the store at [`default_preferences_path`]
    ///
    /// # Errors
    /// See [`default_preferences_path`] and [`JsonFileStore::open`]
    pub fn open_default() -> StorageResult<Self> {
        Self::open(default_preferences_path()?)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
