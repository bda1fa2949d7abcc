//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (prefix table lookup)
//!     → matcher.rs (strip prefix)
//!     → Return: UpstreamTarget or None (static tree)
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Compile prefix matchers
//!     → Freeze as immutable ProxyRouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: first match in table order wins

pub mod matcher;
pub mod router;

pub use router::{ProxyRouter, Route, UpstreamTarget};
