//! Two-stage marketplace fetch: list applications, then list versions per application

use std::sync::Arc;

use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace, warn};

use crate::marketplace::client::HttpClient;
use crate::marketplace::error::FetchError;
use crate::marketplace::types::{ApplicationResponse, CatalogResponse, VersionEntry};
use crate::shutdown::signalled;

/// Default base URL for the Atlassian Marketplace REST API
pub const DEFAULT_BASE_URL: &str = "https://marketplace.atlassian.com/rest/1.0";

/// Outcome of handing one entry to the sink
enum Emit {
    Sent,
    Cancelled,
}

/// Streams every released version of every self-hosted marketplace application
pub struct VersionFetcher {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl VersionFetcher {
    /// Creates a new VersionFetcher with a custom base URL
    pub fn new(client: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a new VersionFetcher against the public marketplace
    pub fn with_client(client: Arc<dyn HttpClient>) -> Self {
        Self::new(client, DEFAULT_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the catalog and emits one entry per version of each self-hosted application
    ///
    /// Applications are processed sequentially in catalog order. Any request, status or
    /// decode failure aborts the whole run; entries already emitted stay emitted.
    /// If `shutdown` turns `true` before an entry is accepted, the run stops and
    /// returns `Ok(())`. The sink is never closed here.
    pub async fn fetch(
        &self,
        mut shutdown: watch::Receiver<bool>,
        sink: &mpsc::Sender<VersionEntry>,
    ) -> Result<(), FetchError> {
        let catalog: CatalogResponse = self.get_json(self.catalog_url()?).await?;
        debug!("found {} applications", catalog.applications.len());

        for application in &catalog.applications {
            if !application.supports_self_hosting() {
                trace!("skip {}: no server hosting support", application.key);
                continue;
            }

            let url = self.application_url(&application.key)?;
            let data: ApplicationResponse = self.get_json(url).await?;
            debug!("found {} versions of {}", data.versions.len(), data.name);

            for version in data.versions {
                trace!("send version {} {} to sink", data.name, version.version);
                let entry = VersionEntry::new(data.name.clone(), version.version);
                if let Emit::Cancelled = emit(entry, &mut shutdown, sink).await? {
                    info!("shutdown requested => stop fetching versions");
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    fn catalog_url(&self) -> Result<Url, FetchError> {
        Url::parse(&format!("{}/applications", self.base_url))
            .map_err(|e| FetchError::BuildRequest(format!("{}: {}", self.base_url, e)))
    }

    /// The key is appended as a single percent-encoded path segment
    fn application_url(&self, key: &str) -> Result<Url, FetchError> {
        let mut url = self.catalog_url()?;
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::BuildRequest(format!("{} cannot be a base URL", self.base_url))
            })?
            .push(key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let request = Request::new(Method::GET, url);
        let url = request.url().to_string();
        debug!("GET {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(FetchError::Request)?;

        if !response.status.is_success() {
            warn!("marketplace returned status {}: {}", response.status, url);
            return Err(FetchError::Status {
                status: response.status,
                url,
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| {
            warn!("Failed to parse marketplace response from {}: {}", url, source);
            FetchError::Decode { url, source }
        })
    }
}

/// Hands one entry to the sink unless shutdown wins the race
///
/// The shutdown branch is polled first, so an already signalled shutdown always
/// takes precedence over a sink with free capacity.
async fn emit(
    entry: VersionEntry,
    shutdown: &mut watch::Receiver<bool>,
    sink: &mpsc::Sender<VersionEntry>,
) -> Result<Emit, FetchError> {
    tokio::select! {
        biased;
        _ = signalled(shutdown) => Ok(Emit::Cancelled),
        sent = sink.send(entry) => sent
            .map(|_| Emit::Sent)
            .map_err(|_| FetchError::SinkClosed),
    }
}
