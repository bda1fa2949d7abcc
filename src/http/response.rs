//! Response handling and transformation.
//!
//! # Responsibilities
//! - Transform the upstream response headers for the client
//! - Inject the cross-origin isolation pair (COOP/COEP)
//!
//! # Design Decisions
//! - Framing and hop-by-hop headers are stripped; hyper re-frames the
//!   streamed body itself
//! - `content-encoding` and `x-content-encoding` are stripped as well while
//!   the raw upstream bytes are forwarded untouched. Kept as observed; an
//!   upstream that really compresses would reach the browser undecoded.
//! - Isolation headers overwrite any upstream value

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Upstream response headers never returned to the client.
pub const STRIPPED_RESPONSE_HEADERS: [&str; 7] = [
    "content-length",
    "transfer-encoding",
    "connection",
    "keep-alive",
    "upgrade",
    "content-encoding",
    "x-content-encoding",
];

pub const CROSS_ORIGIN_OPENER_POLICY: &str = "cross-origin-opener-policy";
pub const CROSS_ORIGIN_EMBEDDER_POLICY: &str = "cross-origin-embedder-policy";

/// Isolation pair required for `SharedArrayBuffer`: (name, value).
pub fn isolation_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (
            HeaderName::from_static(CROSS_ORIGIN_OPENER_POLICY),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static(CROSS_ORIGIN_EMBEDDER_POLICY),
            HeaderValue::from_static("require-corp"),
        ),
    ]
}

/// Set (overwriting) the cross-origin isolation headers.
pub fn insert_isolation_headers(headers: &mut HeaderMap) {
    for (name, value) in isolation_headers() {
        headers.insert(name, value);
    }
}

fn is_stripped(name: &HeaderName) -> bool {
    // Header names are lowercase once parsed.
    STRIPPED_RESPONSE_HEADERS.contains(&name.as_str())
}

/// Build the header set returned to the client from the upstream headers.
pub fn client_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 2);
    for (name, value) in upstream {
        if !is_stripped(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    insert_isolation_headers(&mut headers);
    headers
}
