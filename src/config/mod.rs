//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs) + CLI host/port
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → consumed once by HttpServer::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults reproducing the stock deployment
//! - The prefix table is data, not hand-written routes

pub mod schema;
pub mod validation;

pub use schema::{
    AssetsConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, RouteConfig, UpstreamConfig,
};
pub use validation::{validate_config, ConfigError, ValidationError};
