//! Configuration types for wildcard-dns.
//!
//! Everything is read once at startup from environment variables with no
//! prefix: `ROOT_DOMAIN`, `HOST`, `PORT`, `TTL`, `LOG_LEVEL`, `LOG_FORMAT`
//! and `PROMETHEUS_ADDR`.

use config::{Environment, Map};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::error::DnsError;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// DNS server configuration.
    pub dns: DnsConfig,

    /// Telemetry configuration.
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, DnsError> {
        Self::from_source(Environment::default())
    }

    /// Load configuration from an explicit set of variables instead of the
    /// process environment. Keys are matched case-insensitively.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, DnsError> {
        Self::from_source(Environment::default().source(Some(vars)))
    }

    fn from_source(source: Environment) -> Result<Self, DnsError> {
        let settings = config::Config::builder().add_source(source).build()?;

        let dns: DnsConfig = settings.clone().try_deserialize()?;
        let telemetry: TelemetryConfig = settings.try_deserialize()?;

        Ok(Self {
            dns: dns.normalized()?,
            telemetry,
        })
    }
}

/// DNS server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsConfig {
    /// Domain under which addresses are decoded (e.g., "nip.example.com").
    #[serde(default = "default_root_domain")]
    pub root_domain: String,

    /// Host to bind the UDP socket to; an IP literal or a resolvable name.
    #[serde(default = "default_host")]
    pub host: String,

    /// UDP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// TTL for answer records in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl DnsConfig {
    /// Lowercase the root domain, drop a trailing dot and reject empty labels.
    pub fn normalized(mut self) -> Result<Self, DnsError> {
        let root = self.root_domain.trim().to_ascii_lowercase();
        let root = root.strip_suffix('.').unwrap_or(&root).to_string();

        if root.is_empty() {
            return Err(DnsError::Config("root domain must not be empty".to_string()));
        }
        if root.split('.').any(str::is_empty) {
            return Err(DnsError::Config(format!(
                "root domain {root:?} contains an empty label"
            )));
        }

        self.root_domain = root;
        Ok(self)
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            root_domain: default_root_domain(),
            host: default_host(),
            port: default_port(),
            ttl: default_ttl(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "debug", "wildcard_dns=debug,warn").
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Prometheus metrics exporter address.
    #[serde(default)]
    pub prometheus_addr: Option<SocketAddr>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            prometheus_addr: None,
        }
    }
}

fn default_root_domain() -> String {
    "localhost".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_ttl() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}
