//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration and build the server (upstream pool included)
//! - Bind the listener last, once everything else is ready
//! - Run until a signal arrives, then drain with a deadline
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Shutdown has timeout: streaming downloads have no upstream ceiling,
//!   so draining them is bounded here instead

use std::time::Duration;

use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net;

/// How long in-flight responses may keep streaming after a shutdown signal.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Start the proxy and block until it has shut down.
pub async fn run(config: ProxyConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = ?config.routes.iter().map(|r| (r.prefix.as_str(), r.origin.as_str())).collect::<Vec<_>>(),
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;
    let (listener, local_addr) = net::bind(&server.config().listener).await?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        res = &mut server_task => {
            // The server only returns on its own when serving failed.
            res??;
            return Ok(());
        }
        _ = signals::wait_for_shutdown() => {}
    }

    shutdown.trigger();
    match tokio::time::timeout(DRAIN_TIMEOUT, &mut server_task).await {
        Ok(res) => res??,
        Err(_) => {
            tracing::warn!(
                timeout_secs = DRAIN_TIMEOUT.as_secs(),
                "In-flight requests still streaming, forcing shutdown"
            );
            server_task.abort();
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
