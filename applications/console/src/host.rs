//! Async host loop
//!
//! Owns the timing: ticks the session on an interval, runs catalog fetches
//! on the runtime and hands their results back by token, and reads commands
//! from stdin until `quit`, EOF or Ctrl-C.

use crate::command::{Command, CommandError};
use crate::session::Session;
use folio_core::{KeyValueStore, Track, TrackCatalog};
use folio_playback::FetchRequest;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

type FetchResult = (u64, folio_core::Result<Vec<Track>>);

/// Spawns catalog fetches and reports results on a channel
#[derive(Clone)]
pub struct Fetcher {
    catalog: Arc<dyn TrackCatalog>,
    tx: mpsc::UnboundedSender<FetchResult>,
}

impl Fetcher {
    /// Create a fetcher and the receiving end for its results
    pub fn new(catalog: Arc<dyn TrackCatalog>) -> (Self, mpsc::UnboundedReceiver<FetchResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { catalog, tx }, rx)
    }

    /// Run `request` in the background
    pub fn spawn(&self, request: FetchRequest) {
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            debug!(token = request.token, search = ?request.query.search, "Fetching tracks");
            let result = catalog.fetch_tracks(&request.query).await;
            if tx.send((request.token, result)).is_err() {
                debug!(token = request.token, "Host gone, dropping fetch result");
            }
        });
    }
}

/// Run the console until the user quits
pub async fn run<S: KeyValueStore>(
    mut session: Session<S>,
    catalog: Arc<dyn TrackCatalog>,
    tick: Duration,
) -> crate::Result<()> {
    let (fetcher, mut results) = Fetcher::new(catalog);
    fetcher.spawn(session.start());

    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("folio ready, type 'help' for commands");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(request) = session.frame(Instant::now()) {
                    fetcher.spawn(request);
                }
            }
            Some((token, result)) = results.recv() => {
                if let Err(e) = &result {
                    warn!(token, error = %e, "Catalog fetch failed");
                }
                session.complete_fetch(token, result);
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => match line.parse::<Command>() {
                        Ok(command) => {
                            let reply = session.apply(command, Instant::now());
                            for line in reply.lines {
                                println!("{line}");
                            }
                            if reply.quit {
                                break;
                            }
                        }
                        Err(CommandError::Empty) => {}
                        Err(e) => println!("{e}"),
                    },
                    None => {
                        info!("stdin closed");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }

        for line in session.drain_lines() {
            println!("{line}");
        }
    }

    session.shutdown();
    for line in session.drain_lines() {
        println!("{line}");
    }
    info!("Console stopped");
    Ok(())
}
