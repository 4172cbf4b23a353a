//! Compressed radix trie HTTP router.
//!
//! [`PathTrie`] maps path patterns (static segments, `:name` parameters and a
//! trailing `*name` catch-all) to values. [`Router`] keeps one trie per HTTP
//! method with an `ANY` fallback. The remaining subsystems serve a route table
//! from a TOML file over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Match, Params, PathTrie, RouteError, Router};
