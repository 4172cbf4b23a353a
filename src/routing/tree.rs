//! Path trie: registration and lookup.
//!
//! # Responsibilities
//! - Normalize and validate patterns, then place them in the node tree
//! - Resolve a request path to one value plus its parameter bindings
//!
//! # Design Decisions
//! - Built once, then read-only; lookups take `&self` and share nothing
//! - Static children win over the wildcard child at the same position
//! - No backtracking once a wildcard child has been taken

use std::fmt;

use super::error::RouteResult;
use super::node::{Kind, Node};
use super::params::Params;
use super::path::clean_path;
use super::wildcard::validate_pattern;

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a, T> {
    pub value: &'a T,
    pub params: Params,
}

/// Radix trie mapping path patterns to values.
///
/// ```
/// use trie_router::PathTrie;
///
/// let mut trie = PathTrie::new();
/// trie.insert("/user/admin", "admin").unwrap();
/// trie.insert("/user/:name", "profile").unwrap();
/// trie.insert("/static/*file", "assets").unwrap();
///
/// assert_eq!(*trie.lookup("/user/admin").unwrap().value, "admin");
///
/// let m = trie.lookup("/user/grace").unwrap();
/// assert_eq!(*m.value, "profile");
/// assert_eq!(m.params.get("name"), Some("grace"));
///
/// let m = trie.lookup("/static/css/a.css").unwrap();
/// assert_eq!(m.params.get("file"), Some("css/a.css"));
///
/// assert!(trie.lookup("/nothing/here").is_none());
/// ```
pub struct PathTrie<T> {
    root: Node<T>,
    len: usize,
}

impl<T> PathTrie<T> {
    pub fn new() -> Self {
        Self {
            root: Node::new(Kind::Root, "/"),
            len: 0,
        }
    }

    /// Registers `value` under `pattern`.
    ///
    /// Wildcard syntax errors are reported before the trie is touched. A
    /// structural conflict found deeper down may leave behind a prefix split,
    /// which never changes what other paths resolve to.
    pub fn insert(&mut self, pattern: &str, value: T) -> RouteResult<()> {
        let path = clean_path(pattern);
        validate_pattern(&path)?;
        self.root.insert(&path, &path, value)?;
        self.len += 1;
        Ok(())
    }

    /// Resolves `path`, or returns `None` when no route matches.
    pub fn lookup(&self, path: &str) -> Option<Match<'_, T>> {
        let path = clean_path(path);
        let mut params = Params::new();
        let value = self.root.find(&path, &mut params)?;
        Some(Match { value, params })
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over every registered value, depth first.
    pub fn values(&self) -> Values<'_, T> {
        Values {
            stack: vec![&self.root],
        }
    }
}

impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PathTrie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathTrie")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

/// Iterator returned by [`PathTrie::values`].
pub struct Values<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.wild_child.as_deref());
            self.stack.extend(node.children.iter().rev());
            if let Some(value) = node.value.as_ref() {
                return Some(value);
            }
        }
        None
    }
}
