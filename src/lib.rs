//! Same-origin proxy for the vcsky web build.
//!
//! Serves the site from a local static tree and forwards two URL prefixes
//! to fixed CDN origins, so the browser sees every asset as same-origin.
//! Proxied responses and the index page carry
//! `Cross-Origin-Opener-Policy: same-origin` and
//! `Cross-Origin-Embedder-Policy: require-corp`, which the wasm build
//! needs for `SharedArrayBuffer` threads.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod proxy;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
