//! Route registration errors.
//!
//! Every variant is raised while a route table is being built. A lookup that
//! finds nothing is not an error; it is `None`.

use thiserror::Error;

/// Errors raised when a route cannot be placed in the trie.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A second route terminates at a node that already holds a value.
    #[error("duplicate route: {path}")]
    DuplicateRoute { path: String },

    /// Two routes need different wildcards (`:id`, `*rest`) at the same position.
    #[error("duplicate parameters at same position: {inserted}, {existing}")]
    DuplicateParameter { existing: String, inserted: String },

    /// A single path segment holds more than one `:` or `*` marker.
    #[error("multiple wildcards in one segment: {segment}")]
    MultipleWildcards { segment: String },

    /// A catch-all is followed by more path.
    #[error("route continues after catch-all {segment}")]
    RouteAfterCatchAll { segment: String },

    /// A `:` or `*` marker with no name after it.
    #[error("wildcard without a name in segment {segment}")]
    UnnamedWildcard { segment: String },

    /// Trie error annotated with the method and pattern being registered.
    #[error("{method} {path}: {source}")]
    Conflict {
        method: String,
        path: String,
        #[source]
        source: Box<RouteError>,
    },
}

impl RouteError {
    /// The underlying trie error, looking through `Conflict` context.
    pub fn root_cause(&self) -> &RouteError {
        match self {
            RouteError::Conflict { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for route registration.
pub type RouteResult<T> = Result<T, RouteError>;
