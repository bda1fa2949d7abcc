//! Route lookup and upstream URL construction.
//!
//! # Responsibilities
//! - Store the compiled prefix table
//! - Look up the route claiming a request path
//! - Build the upstream target: `{origin}{rest}` plus `?{query}` verbatim
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (two routes in practice)
//! - Explicit `None` rather than a silent default; unmatched paths belong
//!   to the static file tree

use std::fmt;
use std::sync::Arc;

use axum::http::Uri;

use crate::config::RouteConfig;
use crate::routing::matcher::{Matcher, PathPrefixMatcher};

/// A compiled route: prefix matcher bound to a fixed origin.
#[derive(Debug)]
pub struct Route {
    pub name: Arc<str>,
    pub origin: Arc<str>,
    matcher: PathPrefixMatcher,
}

impl Route {
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }
}

/// Where a single request is forwarded to. Built once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    /// Name of the route that claimed the request.
    pub route: Arc<str>,
    /// Base origin, ending in `/`.
    pub origin: Arc<str>,
    /// Request path with the prefix stripped, still percent-encoded.
    pub path: String,
    /// Original query string, `None` when absent or empty.
    pub query: Option<String>,
}

impl UpstreamTarget {
    /// The fully-qualified upstream URL.
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

/// Prefix table router.
#[derive(Debug, Default)]
pub struct ProxyRouter {
    routes: Vec<Route>,
}

impl ProxyRouter {
    /// Compile the router from route configuration, preserving order.
    pub fn from_config(configs: Vec<RouteConfig>) -> Self {
        let routes = configs
            .into_iter()
            .map(|c| Route {
                name: c.name.into(),
                origin: c.origin.into(),
                matcher: PathPrefixMatcher::new(c.prefix),
            })
            .collect();
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the first route whose prefix claims the URI and build its target.
    pub fn match_uri(&self, uri: &Uri) -> Option<UpstreamTarget> {
        self.routes.iter().find_map(|route| {
            let rest = route.matcher.strip(uri)?;
            Some(UpstreamTarget {
                route: route.name.clone(),
                origin: route.origin.clone(),
                path: rest.to_string(),
                query: uri.query().filter(|q| !q.is_empty()).map(str::to_string),
            })
        })
    }
}
