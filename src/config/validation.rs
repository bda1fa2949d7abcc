//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of a constructed `ProxyConfig`
//! - Check the prefix table (shape, uniqueness) and origin URLs
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the server is constructed

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener bind address is empty")]
    EmptyBindAddress,

    #[error("route `{route}`: prefix `{prefix}` must start and end with '/'")]
    MalformedPrefix { route: String, prefix: String },

    #[error("route `{route}`: prefix `{prefix}` is already claimed by another route")]
    DuplicatePrefix { route: String, prefix: String },

    #[error("route `{route}`: origin `{origin}` is not an absolute http(s) URL")]
    InvalidOrigin { route: String, origin: String },

    #[error("route `{route}`: origin `{origin}` must end with '/'")]
    OriginWithoutTrailingSlash { route: String, origin: String },

    #[error("upstream {field} must be greater than zero when set")]
    ZeroTimeout { field: &'static str },
}

/// Error returned when a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        let prefix = &route.prefix;
        if prefix.len() < 2 || !prefix.starts_with('/') || !prefix.ends_with('/') {
            errors.push(ValidationError::MalformedPrefix {
                route: route.name.clone(),
                prefix: prefix.clone(),
            });
        }
        if !seen.insert(prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix {
                route: route.name.clone(),
                prefix: prefix.clone(),
            });
        }

        match Url::parse(&route.origin) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
                if !route.origin.ends_with('/') {
                    errors.push(ValidationError::OriginWithoutTrailingSlash {
                        route: route.name.clone(),
                        origin: route.origin.clone(),
                    });
                }
            }
            _ => errors.push(ValidationError::InvalidOrigin {
                route: route.name.clone(),
                origin: route.origin.clone(),
            }),
        }
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout { field: "timeout_secs" });
    }
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout { field: "connect_timeout_secs" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ProxyConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "  ".into();
        config.routes = vec![
            RouteConfig::new("a", "vcsky", "https://cdn.example/vcsky/"),
            RouteConfig::new("b", "/x/", "ftp://cdn.example/"),
            RouteConfig::new("c", "/x/", "https://cdn.example/no-slash"),
        ];
        config.upstream.timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::EmptyBindAddress));
        assert!(errors.contains(&ValidationError::MalformedPrefix {
            route: "a".into(),
            prefix: "vcsky".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidOrigin {
            route: "b".into(),
            origin: "ftp://cdn.example/".into(),
        }));
        assert!(errors.contains(&ValidationError::DuplicatePrefix {
            route: "c".into(),
            prefix: "/x/".into(),
        }));
        assert!(errors.contains(&ValidationError::OriginWithoutTrailingSlash {
            route: "c".into(),
            origin: "https://cdn.example/no-slash".into(),
        }));
        assert!(errors.contains(&ValidationError::ZeroTimeout { field: "timeout_secs" }));
    }

    #[test]
    fn test_config_error_lists_all_problems() {
        let err = ConfigError::Validation(vec![
            ValidationError::EmptyBindAddress,
            ValidationError::ZeroTimeout { field: "connect_timeout_secs" },
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: listener bind address is empty, \
             upstream connect_timeout_secs must be greater than zero when set"
        );
    }

    #[test]
    fn test_bind_wraps_ipv6_hosts() {
        assert_eq!(ProxyConfig::with_bind("::", 8000).listener.bind_address, "[::]:8000");
        assert_eq!(ProxyConfig::with_bind("127.0.0.1", 9).listener.bind_address, "127.0.0.1:9");
    }
}
