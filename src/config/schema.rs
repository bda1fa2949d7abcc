//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! Every section has a `Default` that reproduces the stock deployment:
//! two CDN prefixes, a `dist/` static tree, and no upstream timeout.

use std::path::PathBuf;
use std::time::Duration;

/// Upstream origin for `/vcsky/`.
pub const VCSKY_ORIGIN: &str = "https://cdn.dos.zone/vcsky/";

/// Upstream origin for `/vcbr/` (brotli-packed wasm and data bundles).
pub const VCBR_ORIGIN: &str = "https://br.cdn.dos.zone/vcsky/";

/// Root configuration for the proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Prefix table mapping request paths to upstream origins.
    pub routes: Vec<RouteConfig>,

    /// Local static tree served at the site root.
    pub assets: AssetsConfig,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: RouteConfig::defaults(),
            assets: AssetsConfig::default(),
            upstream: UpstreamConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Default configuration listening on `host:port`.
    pub fn with_bind(host: &str, port: u16) -> Self {
        let mut config = Self::default();
        config.listener.bind_address = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        };
        config
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// One entry of the prefix table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Route identifier for logging.
    pub name: String,

    /// Path prefix to match, with leading and trailing slash (e.g. "/vcsky/").
    pub prefix: String,

    /// Base origin the remainder of the path is appended to. Ends with `/`.
    pub origin: String,
}

impl RouteConfig {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            origin: origin.into(),
        }
    }

    /// The two CDN routes the site depends on.
    pub fn defaults() -> Vec<RouteConfig> {
        vec![
            RouteConfig::new("vcsky", "/vcsky/", VCSKY_ORIGIN),
            RouteConfig::new("vcbr", "/vcbr/", VCBR_ORIGIN),
        ]
    }
}

/// Static file configuration.
#[derive(Debug, Clone)]
pub struct AssetsConfig {
    /// Directory served for any path no proxy prefix claims.
    pub root: PathBuf,

    /// Page served at `/` with cross-origin isolation headers.
    pub index: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dist"),
            index: PathBuf::from("dist/index.html"),
        }
    }
}

impl AssetsConfig {
    /// Serve `root`, with `root/index.html` as the index page.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let index = root.join("index.html");
        Self { root, index }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Total request ceiling in seconds. `None` means unbounded, which large
    /// asset downloads over slow links rely on.
    pub timeout_secs: Option<u64>,

    /// Connection establishment ceiling in seconds. `None` means unbounded.
    pub connect_timeout_secs: Option<u64>,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            connect_timeout_secs: None,
            system_proxy: true,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
