use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single fetch run. Every stage wraps its cause with a short prefix.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("build request failed: {0}")]
    BuildRequest(String),

    #[error("request failed: {0:#}")]
    Request(#[source] anyhow::Error),

    #[error("request status code != 2xx: {status} {url}")]
    Status { status: StatusCode, url: String },

    #[error("decode json failed for {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("output sink closed")]
    SinkClosed,
}
