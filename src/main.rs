use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use atlassian_version_collector::collector::Collector;
use atlassian_version_collector::config::{CollectorConfig, LogFormat};
use atlassian_version_collector::logging::init_logging;
use atlassian_version_collector::marketplace::{ReqwestClient, VersionFetcher};
use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "atlassian-version-collector")]
#[command(
    version,
    about = "Streams released versions of self-hosted Atlassian Marketplace applications as JSON lines"
)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Marketplace REST base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Delay between two runs in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Run a single fetch and exit
    #[arg(long)]
    once: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Command line flags take precedence over the config file
    fn apply(&self, config: &mut CollectorConfig) {
        if let Some(base_url) = &self.base_url {
            config.marketplace.base_url = base_url.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.poll.interval_ms = interval_ms;
        }
        if self.once {
            config.poll.once = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config =
        CollectorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let _guard = init_logging(&config.logging)?;
    info!("Marketplace: {}", config.marketplace.base_url);

    let client =
        ReqwestClient::new(config.marketplace.timeout()).context("Failed to create HTTP client")?;
    let fetcher = VersionFetcher::new(Arc::new(client), &config.marketplace.base_url);
    let collector = Collector::new(fetcher, config.poll.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl-C => shutting down");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    collector
        .run(shutdown_rx, tokio::io::stdout)
        .await
        .context("Failed to collect versions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overrides_config_with_flags() {
        let cli = Cli::parse_from([
            "atlassian-version-collector",
            "--base-url",
            "http://localhost:1234/rest/1.0",
            "--interval-ms",
            "500",
            "--once",
            "--log-level",
            "debug",
            "--json-logs",
        ]);
        let mut config = CollectorConfig::default();

        cli.apply(&mut config);

        assert_eq!(config.marketplace.base_url, "http://localhost:1234/rest/1.0");
        assert_eq!(config.poll.interval_ms, 500);
        assert!(config.poll.once);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn zero_interval_flag_fails_validation() {
        let cli = Cli::parse_from(["atlassian-version-collector", "--interval-ms", "0"]);
        let mut config = CollectorConfig::default();

        cli.apply(&mut config);

        assert!(config.validate().is_err());
    }

    #[test]
    fn apply_without_flags_keeps_config() {
        let cli = Cli::parse_from(["atlassian-version-collector"]);
        let mut config = CollectorConfig::default();

        cli.apply(&mut config);

        assert_eq!(config, CollectorConfig::default());
    }
}
