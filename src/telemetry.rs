//! Telemetry setup for wildcard-dns.
//!
//! Supports:
//! - Tracing with configurable log levels, as text or JSON lines
//! - Prometheus metrics endpoint (with `prometheus` feature)

#[cfg(feature = "prometheus")]
use std::net::SocketAddr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, TelemetryConfig};
use crate::error::DnsError;

/// Initialize telemetry (tracing, optional Prometheus exporter).
pub fn init(config: &TelemetryConfig) -> Result<(), DnsError> {
    init_tracing(config)?;

    if let Some(addr) = config.prometheus_addr {
        #[cfg(feature = "prometheus")]
        start_prometheus_exporter(addr)?;

        #[cfg(not(feature = "prometheus"))]
        tracing::warn!(%addr, "PROMETHEUS_ADDR set but built without the `prometheus` feature");
    }

    Ok(())
}

fn init_tracing(config: &TelemetryConfig) -> Result<(), DnsError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            DnsError::Config(format!("invalid log level {:?}: {}", config.log_level, e))
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.log_format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    result.map_err(|e| DnsError::Telemetry(e.to_string()))
}

/// Start Prometheus metrics HTTP exporter.
#[cfg(feature = "prometheus")]
fn start_prometheus_exporter(addr: SocketAddr) -> Result<(), DnsError> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| DnsError::Telemetry(e.to_string()))?;

    tracing::info!(%addr, "Prometheus metrics exporter started");

    Ok(())
}
