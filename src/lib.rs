//! Wildcard DNS - an authoritative responder that answers from the query name itself.
//!
//! Any name under the configured root domain that embeds an IP address
//! resolves to that address. There is no zone data, no upstream resolver and
//! no state shared between requests.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        wildcard-dns                         │
//! │                                                             │
//! │  UDP :53 ──▶ DnsServer ──▶ QueryHandler ──┬──▶ codec        │
//! │  (datagram)  (decode /     (first         │   (IPv4/IPv6)   │
//! │      ◀──────  encode)       question)     └──▶ txt          │
//! │                                               (version,     │
//! │                                                whoami)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Name grammar
//!
//! ```text
//! A     app-10-0-0-1-dev.<root>     → 10.0.0.1   (dash style, tried first)
//! A     10.0.0.1.anything.<root>    → 10.0.0.1   (dot style)
//! AAAA  2001-db8--1.anything.<root> → 2001:db8::1 (first label only)
//! TXT   version.<root>              → server version
//! TXT   whoami.<root>               → the querying address
//! ```
//!
//! Malformed datagrams and messages without a question get no reply. Every
//! other query gets an authoritative NOERROR response, with an empty answer
//! section when nothing matched.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tokio_util::sync::CancellationToken;
//! use wildcard_dns::{DnsConfig, DnsServer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = DnsConfig {
//!         root_domain: "nip.example.com".to_string(),
//!         host: "127.0.0.1".to_string(),
//!         port: 5353,
//!         ttl: 60,
//!     };
//!
//!     let server = DnsServer::bind(config).await.unwrap();
//!     server.run(CancellationToken::new()).await;
//! }
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod server;
pub mod telemetry;
pub mod txt;

// Re-export main types
pub use crate::config::{Config, DnsConfig, LogFormat, TelemetryConfig};
pub use crate::error::DnsError;
pub use crate::handler::QueryHandler;
pub use crate::server::DnsServer;
