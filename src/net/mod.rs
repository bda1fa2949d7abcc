//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host:port)
//!     → listener.rs (bind, resolve host names)
//!     → TcpListener handed to HttpServer::run
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
