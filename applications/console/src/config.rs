//! Console configuration
use crate::error::{ConsoleError, Result};
use folio_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_console")]
    pub console: ConsoleSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Catalog server base URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Serve the built-in demo catalog instead of contacting the server
    #[serde(default)]
    pub offline: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Preferences file; platform config dir when unset
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleSettings {
    /// Host tick interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Simulated track length when a track carries no duration
    #[serde(default = "default_track_seconds")]
    pub default_track_seconds: u64,
}

impl ConsoleConfig {
    /// Default config file name, looked up in the working directory
    pub const DEFAULT_FILE: &'static str = "folio.toml";

    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `folio.toml` is optional.
    /// Environment variables prefixed with `FOLIO_` override file values,
    /// with `__` separating nested keys (`FOLIO_SERVER__URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConsoleError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(Self::DEFAULT_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConsoleError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.console.tick_ms == 0 {
            return Err(ConsoleError::Config("console.tick_ms must be > 0".to_string()));
        }

        if !self.server.offline && self.server.url.trim().is_empty() {
            return Err(ConsoleError::Config(
                "server.url is required unless offline (set FOLIO_SERVER__URL)".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        url: default_url(),
        offline: false,
    }
}

fn default_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        preferences_path: None,
    }
}

fn default_console() -> ConsoleSettings {
    ConsoleSettings {
        tick_ms: default_tick_ms(),
        default_track_seconds: default_track_seconds(),
    }
}

fn default_tick_ms() -> u64 {
    16
}

fn default_track_seconds() -> u64 {
    180
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            player: PlayerConfig::default(),
            storage: default_storage(),
            console: default_console(),
        }
    }
}
