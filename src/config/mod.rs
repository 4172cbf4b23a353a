//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route conflicts)
//!     → ServerConfig (validated, immutable)
//!     → loader::build_router → Router<RouteConfig>
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and compiles the new table
//!     → atomic swap of Arc<Router<RouteConfig>> in the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{build_router, load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RouteConfig, ServerConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::{ConfigWatcher, RouterUpdate};
