//! Error types for wildcard-dns.

use thiserror::Error;

/// Errors that can occur while starting or running the DNS server.
#[derive(Debug, Error)]
pub enum DnsError {
    /// IO error (socket bind, local address lookup)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// DNS protocol error
    #[error("DNS protocol error: {0}")]
    Proto(#[from] hickory_proto::ProtoError),

    /// Logging or metrics exporter setup failed
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
