//! Atlassian Marketplace access layer
//!
//! Discovers applications that can be hosted on a customer's own servers and
//! streams their released versions to a consumer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ HttpClient  │◀────│   Fetcher   │────▶│    sink     │
//! │  (execute)  │     │ (2 stages)  │     │   (mpsc)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`client`]: HttpClient trait and its reqwest implementation
//! - [`fetcher`]: Catalog and per-application version fetch
//! - [`error`]: Error type of a fetch run
//! - [`types`]: `VersionEntry` and the marketplace wire format

pub mod client;
pub mod error;
pub mod fetcher;
pub mod types;

pub use client::{HttpClient, HttpResponse, ReqwestClient};
pub use error::FetchError;
pub use fetcher::{DEFAULT_BASE_URL, VersionFetcher};
pub use types::VersionEntry;
