//! Logging and metrics bootstrap.

use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ObservabilityConfig};

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Must run inside the tokio runtime when Loki shipping is enabled.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if let Some(loki_url) = &config.observability.loki_url {
        let url = url::Url::parse(loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "cinemanager")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!("Loki logging initialized at {}", loki_url);
    } else {
        registry.init();
    }

    Ok(())
}

/// Starts the Prometheus scrape endpoint when an address is configured.
///
/// Without it the `metrics` macros are no-ops.
pub fn install_metrics(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let Some(addr) = &config.metrics_addr else {
        return Ok(());
    };

    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid METRICS_ADDR: {addr}"))?;

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    info!("Prometheus metrics exposed on http://{}/metrics", addr);
    Ok(())
}
