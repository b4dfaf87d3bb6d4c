//! Polling loop that feeds fetched versions to the publisher

use std::io;

use thiserror::Error;
use tokio::io::AsyncWrite;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinError;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::config::{OUTPUT_BUFFER_SIZE, PollConfig};
use crate::marketplace::{FetchError, VersionFetcher};
use crate::publish::publish_entries;
use crate::shutdown::signalled;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("publish failed: {0}")]
    Publish(#[source] io::Error),

    #[error("publisher task failed: {0}")]
    Publisher(#[from] JoinError),
}

/// Result of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub published: usize,
}

pub struct Collector {
    fetcher: VersionFetcher,
    poll: PollConfig,
}

impl Collector {
    pub fn new(fetcher: VersionFetcher, poll: PollConfig) -> Self {
        Self { fetcher, poll }
    }

    /// Runs one full fetch and publishes every entry to `writer`
    ///
    /// The publisher runs on its own task; the sink is closed once the fetch returns.
    pub async fn run_once<W>(
        &self,
        shutdown: watch::Receiver<bool>,
        writer: W,
    ) -> Result<RunSummary, CollectorError>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(OUTPUT_BUFFER_SIZE);
        let publisher = tokio::spawn(publish_entries(rx, writer));

        let fetched = self.fetcher.fetch(shutdown, &tx).await;
        drop(tx);
        let published = publisher.await?;

        match (fetched, published) {
            // A failing publisher closes the sink; report the root cause
            (Ok(()) | Err(FetchError::SinkClosed), Err(e)) => Err(CollectorError::Publish(e)),
            (Err(e), _) => Err(CollectorError::Fetch(e)),
            (Ok(()), Ok(published)) => Ok(RunSummary { published }),
        }
    }

    /// Polls the marketplace until shutdown is requested
    ///
    /// In `once` mode the single run's result is returned. Otherwise a failed run is
    /// logged and the next tick starts a full re-run.
    pub async fn run<W, F>(
        &self,
        mut shutdown: watch::Receiver<bool>,
        mut make_writer: F,
    ) -> Result<(), CollectorError>
    where
        W: AsyncWrite + Unpin + Send + 'static,
        F: FnMut() -> W,
    {
        if self.poll.once {
            let summary = self.run_once(shutdown, make_writer()).await?;
            info!("published {} versions", summary.published);
            return Ok(());
        }

        let mut ticker = interval(self.poll.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = signalled(&mut shutdown) => {
                    info!("shutdown requested => stop polling");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            match self.run_once(shutdown.clone(), make_writer()).await {
                Ok(summary) => info!("published {} versions", summary.published),
                Err(e) => error!("collect versions failed: {}", e),
            }
        }
    }
}
