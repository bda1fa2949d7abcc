//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch)
//!     → GET /            → assets.rs (index page + isolation headers)
//!     → /<prefix>/<rest> → request.rs (forwarded headers)
//!                        → proxy::forward
//!                        → response.rs (strip, inject COOP/COEP)
//!     → anything else    → assets.rs (static tree, 404 when absent)
//!     → Send to client
//! ```

pub mod assets;
pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, ServerError};
