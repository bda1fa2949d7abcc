//! Request handling and transformation.
//!
//! # Responsibilities
//! - Derive the header set forwarded upstream from the inbound headers
//! - Gate the methods the proxy forwards
//!
//! # Design Decisions
//! - Only `host` and `content-length` are dropped; the client computes both
//!   for the outbound connection
//! - Everything else, repeated headers included, passes through in order

use axum::http::{HeaderMap, Method};

/// Inbound headers never forwarded upstream.
pub const STRIPPED_REQUEST_HEADERS: [&str; 2] = ["host", "content-length"];

/// Methods accepted on proxy prefixes.
pub const PROXIED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
];

/// Build the outbound header set: the inbound headers minus `host` and
/// `content-length`.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if !STRIPPED_REQUEST_HEADERS.contains(&name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}

pub fn is_proxied_method(method: &Method) -> bool {
    PROXIED_METHODS.contains(method)
}

/// Value for the `Allow` header on 405 responses.
pub fn allow_header_value() -> String {
    PROXIED_METHODS
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
