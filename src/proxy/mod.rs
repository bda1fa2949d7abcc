//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamTarget + inbound request
//!     → forwarder.rs (build and send outbound request)
//!     → upstream.rs (shared client, guarded body stream)
//!     → streamed response to client
//! ```
//!
//! # Design Decisions
//! - One client (connection pool) per process, shared by both origins
//! - Failures surface as `ProxyError`; no retry, no fallback origin
//! - The upstream exchange is released when the body stream is dropped,
//!   whether it finished or the client disconnected

pub mod error;
pub mod forwarder;
pub mod upstream;

pub use error::ProxyError;
pub use forwarder::forward;
pub use upstream::{build_client, GuardedStream, LeaseState, UpstreamLease};
