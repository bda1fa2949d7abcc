//! Forwarding errors and their HTTP mapping.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::request::allow_header_value;

/// Failure while forwarding a request. Never retried.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// DNS, connect, TLS or timeout failure reaching the origin.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("method {0} is not proxied")]
    MethodNotAllowed(Method),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ProxyError::Upstream(_) => {
                let body = if status == StatusCode::GATEWAY_TIMEOUT {
                    "Upstream request timed out"
                } else {
                    "Upstream request failed"
                };
                (status, body).into_response()
            }
            ProxyError::MethodNotAllowed(_) => {
                let mut response = status.into_response();
                if let Ok(allow) = HeaderValue::from_str(&allow_header_value()) {
                    response.headers_mut().insert(header::ALLOW, allow);
                }
                response
            }
        }
    }
}
