//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request path against a prefix (case-sensitive)
//! - Hand back the remainder of the path after the prefix
//!
//! # Design Decisions
//! - Matching works on the raw, still percent-encoded path
//! - No regex to guarantee O(n) matching

use axum::http::Uri;

/// Trait for matching request URIs against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the part of the path left after the match, or `None`.
    fn strip<'a>(&self, uri: &'a Uri) -> Option<&'a str>;

    /// Returns true if the URI matches this condition.
    fn matches(&self, uri: &Uri) -> bool {
        self.strip(uri).is_some()
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathPrefixMatcher {
    fn strip<'a>(&self, uri: &'a Uri) -> Option<&'a str> {
        uri.path().strip_prefix(self.prefix.as_str())
    }
}
