//! Request forwarding.
//!
//! # Data Flow
//! ```text
//! inbound request + UpstreamTarget
//!     → method gate
//!     → outbound request (same method, body, headers minus host/content-length)
//!     → send, no retry
//!     → status verbatim, rewritten headers, guarded body stream
//! ```

use axum::body::{Body, HttpBody};
use axum::http::Request;
use axum::response::Response;

use crate::http::request::{forwarded_headers, is_proxied_method};
use crate::http::response::client_headers;
use crate::proxy::error::ProxyError;
use crate::proxy::upstream::{GuardedStream, UpstreamLease};
use crate::routing::UpstreamTarget;

/// Forward `request` to `target` and stream the upstream response back.
pub async fn forward(
    client: &reqwest::Client,
    target: UpstreamTarget,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    if !is_proxied_method(&parts.method) {
        return Err(ProxyError::MethodNotAllowed(parts.method));
    }

    let url = target.url();
    let mut outbound = client
        .request(parts.method.clone(), &url)
        .headers(forwarded_headers(&parts.headers));
    if !body.is_end_stream() {
        outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    tracing::debug!(
        route = %target.route,
        method = %parts.method,
        url = %url,
        "Forwarding request"
    );

    let upstream = outbound.send().await.map_err(|e| {
        tracing::error!(
            route = %target.route,
            method = %parts.method,
            url = %url,
            error = %e,
            "Upstream error"
        );
        ProxyError::Upstream(e)
    })?;

    let status = upstream.status();
    let headers = client_headers(upstream.headers());
    tracing::debug!(
        route = %target.route,
        url = %url,
        status = status.as_u16(),
        "Upstream responded"
    );

    let lease = UpstreamLease::new(target.route, url);
    let body = Body::from_stream(GuardedStream::new(upstream.bytes_stream(), lease));

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
