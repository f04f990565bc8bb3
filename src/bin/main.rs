//! wildcard-dns binary entry point.
//!
//! Configured entirely through environment variables; see
//! [`wildcard_dns::config`].

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use wildcard_dns::{telemetry, Config, DnsServer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize telemetry
    telemetry::init(&config.telemetry)?;

    info!(
        root_domain = %config.dns.root_domain,
        host = %config.dns.host,
        port = config.dns.port,
        ttl = config.dns.ttl,
        "Starting wildcard-dns"
    );

    // Setup graceful shutdown
    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let server = match DnsServer::bind(config.dns).await {
        Ok(server) => server,
        Err(e) => {
            error!("DNS server error: {}", e);
            return Err(e.into());
        }
    };
    server.run(shutdown).await;

    info!("wildcard-dns shutdown complete");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C, or SIGTERM on unix.
async fn cancel_on_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    let _ = tokio::signal::ctrl_c().await;

    info!("Shutdown signal received");
    shutdown.cancel();
}
