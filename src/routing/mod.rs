//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup or reload):
//!     (method, pattern, value)
//!     → router.rs (pick the method's trie)
//!     → path.rs (normalize)
//!     → wildcard.rs (validate tokens)
//!     → node.rs (split / place / reorder)
//!
//! Incoming Request (method, path)
//!     → router.rs (method trie, then ANY)
//!     → tree.rs (walk the trie, bind parameters)
//!     → Return: Match { value, params } or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path; lookup is linear in the path length
//! - Deterministic: same input always matches same route
//! - Static segments take precedence over parameters at the same position

pub mod error;
pub mod node;
pub mod params;
pub mod path;
pub mod router;
pub mod tree;
pub(crate) mod wildcard;

pub use error::{RouteError, RouteResult};
pub use node::Kind;
pub use params::Params;
pub use path::clean_path;
pub use router::{method_key, Router, ANY_METHOD};
pub use tree::{Match, PathTrie, Values};
