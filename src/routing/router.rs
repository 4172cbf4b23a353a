//! Method-aware route lookup.
//!
//! # Responsibilities
//! - Keep one path trie per HTTP method
//! - Apply the method fallback policy: the method's own trie first, then `ANY`
//! - Attach method and pattern context to registration errors
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Method names are case-insensitive; `*` and `all` alias `ANY`
//! - Explicit `None` rather than a silent default route

use std::collections::HashMap;
use std::fmt;

use super::error::{RouteError, RouteResult};
use super::tree::{Match, PathTrie};

/// Method key for routes that accept any method.
pub const ANY_METHOD: &str = "ANY";

/// Routes keyed by HTTP method.
pub struct Router<T> {
    tries: HashMap<String, PathTrie<T>>,
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self {
            tries: HashMap::new(),
        }
    }

    /// Registers `value` for `method` and `path`.
    pub fn insert(&mut self, method: &str, path: &str, value: T) -> RouteResult<()> {
        let method = method_key(method);
        self.tries
            .entry(method.clone())
            .or_default()
            .insert(path, value)
            .map_err(|source| RouteError::Conflict {
                method: method.clone(),
                path: path.to_string(),
                source: Box::new(source),
            })?;

        tracing::debug!(method = %method, path = %path, "Route registered");
        Ok(())
    }

    /// Finds the route for `method` and `path`, falling back to `ANY`.
    pub fn at(&self, method: &str, path: &str) -> Option<Match<'_, T>> {
        let method = method_key(method);
        let found = self
            .tries
            .get(&method)
            .and_then(|trie| trie.lookup(path))
            .or_else(|| {
                if method == ANY_METHOD {
                    return None;
                }
                self.tries.get(ANY_METHOD)?.lookup(path)
            });

        tracing::trace!(method = %method, path = %path, matched = found.is_some(), "Route lookup");
        found
    }

    /// The trie for one method, without fallback.
    pub fn trie(&self, method: &str) -> Option<&PathTrie<T>> {
        self.tries.get(&method_key(method))
    }

    /// Methods that have at least one route, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self
            .tries
            .iter()
            .filter(|(_, trie)| !trie.is_empty())
            .map(|(method, _)| method.as_str())
            .collect();
        methods.sort_unstable();
        methods
    }

    /// Total number of routes across all methods.
    pub fn len(&self) -> usize {
        self.tries.values().map(PathTrie::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registered value, grouped by method in sorted method order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.methods()
            .into_iter()
            .filter_map(|method| self.tries.get(method))
            .flat_map(PathTrie::values)
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.tries.iter()).finish()
    }
}

/// Canonical form of a method name.
pub fn method_key(method: &str) -> String {
    let method = method.trim().to_ascii_uppercase();
    match method.as_str() {
        "*" | "ALL" | "" => ANY_METHOD.to_string(),
        _ => method,
    }
}
