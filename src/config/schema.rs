//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::ANY_METHOD;

/// Root configuration for the router server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route table served by the stub server.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// A single route: where it matches and what the stub server answers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging, metrics and the `x-route-name` header.
    pub name: String,

    /// HTTP method, or `ANY` to accept every method.
    #[serde(default = "default_method")]
    pub method: String,

    /// Path pattern (`/user/:id`, `/static/*file`).
    pub path: String,

    /// Status code returned on match.
    #[serde(default = "default_status")]
    pub status: u16,

    /// Fixed response body. When absent the match itself is returned as JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RouteConfig {
    /// A route answering `200` with the match as JSON.
    pub fn new(name: impl Into<String>, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            path: path.into(),
            status: default_status(),
            body: None,
        }
    }
}

fn default_method() -> String {
    ANY_METHOD.to_string()
}

fn default_status() -> u16 {
    200
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.metrics_enabled);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_route_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [[routes]]
            name = "files"
            path = "/static/*file"

            [[routes]]
            name = "teapot"
            method = "GET"
            path = "/tea"
            status = 418
            body = "short and stout"
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].method, ANY_METHOD);
        assert_eq!(config.routes[0].status, 200);
        assert_eq!(config.routes[0].body, None);
        assert_eq!(config.routes[1].status, 418);
        assert_eq!(config.routes[1].body.as_deref(), Some("short and stout"));
    }

    #[test]
    fn test_route_requires_name_and_path() {
        let result: Result<ServerConfig, _> = toml::from_str("[[routes]]\nname = \"x\"\n");
        assert!(result.is_err());
    }
}
