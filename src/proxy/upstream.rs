//! Upstream client and scoped body streaming.
//!
//! # Responsibilities
//! - Build the process-wide outbound client (one pool for both origins)
//! - Wrap the upstream body so the connection is released on every exit
//!   path: completion, read error, or the client dropping the response
//!
//! # Design Decisions
//! - No timeout unless configured; large downloads may run indefinitely
//! - Redirects are not followed, a 3xx is the client's to handle
//! - No response decompression, bytes pass through as received

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Bytes;
use futures_util::Stream;
use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;

/// Build the shared outbound client.
pub fn build_client(config: &UpstreamConfig) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().redirect(Policy::none());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if !config.system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// How an upstream body ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseState {
    /// Still streaming; if dropped in this state the client went away.
    Streaming,
    Completed,
    Failed,
}

/// Held for as long as an upstream body is being forwarded. Dropping it
/// marks the upstream exchange as released.
#[derive(Debug)]
pub struct UpstreamLease {
    route: Arc<str>,
    url: String,
    started: Instant,
    bytes: u64,
    state: LeaseState,
}

impl UpstreamLease {
    pub fn new(route: Arc<str>, url: String) -> Self {
        Self {
            route,
            url,
            started: Instant::now(),
            bytes: 0,
            state: LeaseState::Streaming,
        }
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn state(&self) -> LeaseState {
        self.state
    }
}

impl Drop for UpstreamLease {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        match self.state {
            LeaseState::Completed => tracing::debug!(
                route = %self.route,
                url = %self.url,
                bytes = self.bytes,
                elapsed_ms,
                "Upstream body forwarded, connection released"
            ),
            LeaseState::Streaming => tracing::debug!(
                route = %self.route,
                url = %self.url,
                bytes = self.bytes,
                elapsed_ms,
                "Client went away mid-stream, upstream connection released"
            ),
            LeaseState::Failed => tracing::debug!(
                route = %self.route,
                url = %self.url,
                bytes = self.bytes,
                elapsed_ms,
                "Upstream body failed, connection released"
            ),
        }
    }
}

/// Upstream body stream that owns its lease.
///
/// Chunks are yielded exactly as the inner stream produces them.
pub struct GuardedStream<S> {
    inner: Pin<Box<S>>,
    lease: UpstreamLease,
}

impl<S> GuardedStream<S> {
    pub fn new(inner: S, lease: UpstreamLease) -> Self {
        Self {
            inner: Box::pin(inner),
            lease,
        }
    }

    pub fn lease(&self) -> &UpstreamLease {
        &self.lease
    }
}

impl<S, E> Stream for GuardedStream<S>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: fmt::Display,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.lease.state != LeaseState::Streaming {
            return Poll::Ready(None);
        }

        match this.inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.lease.bytes += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(Some(Err(e))) => {
                tracing::warn!(
                    route = %this.lease.route,
                    url = %this.lease.url,
                    bytes = this.lease.bytes,
                    error = %e,
                    "Upstream body read failed"
                );
                this.lease.state = LeaseState::Failed;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.lease.state = LeaseState::Completed;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
