//! Local static tree.
//!
//! `/` serves the index page with the isolation headers so the page can
//! use `SharedArrayBuffer`; every other unclaimed path is looked up under
//! the static root, 404 when absent.

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::{get_service, MethodRouter};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::AssetsConfig;
use crate::http::response::isolation_headers;

/// Method router for `GET /`.
pub fn index_service<S>(config: &AssetsConfig) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let [(opener, opener_value), (embedder, embedder_value)] = isolation_headers();
    get_service(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(opener, opener_value))
            .layer(SetResponseHeaderLayer::overriding(embedder, embedder_value))
            .service(ServeFile::new(&config.index)),
    )
}

/// Service for the static tree. Directories are not resolved to an index.
pub fn static_tree(config: &AssetsConfig) -> ServeDir {
    ServeDir::new(&config.root).append_index_html_on_directories(false)
}

/// Serve `request` from the static tree.
pub async fn serve_static(tree: ServeDir, request: Request<Body>) -> Response {
    match tree.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
