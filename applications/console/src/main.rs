//! folio - terminal music player
use anyhow::Context;
use clap::Parser;
use folio_console::{config::ConsoleConfig, demo, host, session::Session};
use folio_core::TrackCatalog;
use folio_server_client::{FolioServerClient, ServerConfig};
use folio_storage::JsonFileStore;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio terminal music player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog server URL (overrides config)
    #[arg(short, long)]
    server: Option<String>,

    /// Use the built-in demo catalog
    #[arg(long)]
    offline: bool,

    /// Preferences file (overrides config)
    #[arg(long)]
    preferences: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_console=info,folio_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config =
        ConsoleConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }
    if cli.offline {
        config.server.offline = true;
    }
    if let Some(path) = cli.preferences {
        config.storage.preferences_path = Some(path);
    }
    config.validate()?;

    let catalog: Arc<dyn TrackCatalog> = if config.server.offline {
        info!("Offline mode, serving demo catalog");
        Arc::new(demo::demo_catalog())
    } else {
        let client = FolioServerClient::new(ServerConfig::new(config.server.url.clone()))?;
        info!(url = %client.url(), "Using catalog server");
        if config.player.media_base_url.is_none() {
            config.player.media_base_url = Some(client.url().to_string());
        }
        Arc::new(client)
    };

    let store = match &config.storage.preferences_path {
        Some(path) => JsonFileStore::open(path.clone()),
        None => JsonFileStore::open_default(),
    }
    .context("Failed to open preferences")?;
    info!(path = %store.path().display(), "Preferences loaded");

    let session = Session::new(
        config.player.clone(),
        store,
        Duration::from_secs(config.console.default_track_seconds),
    );

    host::run(
        session,
        catalog,
        Duration::from_millis(config.console.tick_ms),
    )
    .await?;

    Ok(())
}
