//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes, addresses)
//! - Detect conflicting routes by building the route table
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::Router;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("route #{0} has an empty name")]
    EmptyRouteName(usize),

    #[error("route '{0}' has an empty path")]
    EmptyRoutePath(String),

    #[error("route '{name}' has invalid status code {status}")]
    InvalidStatus { name: String, status: u16 },

    #[error("route name '{0}' is used more than once")]
    DuplicateRouteName(String),

    #[error("route '{name}' conflicts: {reason}")]
    RouteConflict { name: String, reason: String },
}

/// Validates `config`, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let mut names = HashSet::new();
    let mut router = Router::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName(index));
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }

        if route.path.trim().is_empty() {
            errors.push(ValidationError::EmptyRoutePath(route.name.clone()));
            continue;
        }

        if !(100..=599).contains(&route.status) {
            errors.push(ValidationError::InvalidStatus {
                name: route.name.clone(),
                status: route.status,
            });
        }

        if let Err(e) = router.insert(&route.method, &route.path, ()) {
            errors.push(ValidationError::RouteConflict {
                name: route.name.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
