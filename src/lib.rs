//! Collects released versions of Atlassian Marketplace applications that
//! support self-hosted (server) deployment.
//!
//! # Modules
//!
//! - [`marketplace`]: Catalog and version fetch against the marketplace API
//! - [`collector`]: Poll loop wiring the fetcher to the publisher
//! - [`publish`]: JSON lines output of fetched versions
//! - [`shutdown`]: Cooperative shutdown signal
//! - [`config`]: Configuration file and defaults
//! - [`logging`]: tracing subscriber setup

pub mod collector;
pub mod config;
pub mod logging;
pub mod marketplace;
pub mod publish;
pub mod shutdown;
