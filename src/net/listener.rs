//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind to the configured `host:port`
//! - Report the bound address (port 0 resolves to an ephemeral port)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind a listener for the configured address. Host names are resolved.
pub async fn bind(config: &ListenerConfig) -> Result<(TcpListener, SocketAddr), ListenerError> {
    let bind_error = |source| ListenerError::Bind {
        address: config.bind_address.clone(),
        source,
    };

    let listener = TcpListener::bind(config.bind_address.as_str())
        .await
        .map_err(bind_error)?;
    let local_addr = listener.local_addr().map_err(bind_error)?;

    tracing::debug!(
        requested = %config.bind_address,
        address = %local_addr,
        "Listener bound"
    );
    Ok((listener, local_addr))
}
