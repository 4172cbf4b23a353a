//! Trie node model and insertion.
//!
//! # Responsibilities
//! - Hold one segment of a route pattern plus its children
//! - Split a node when a new pattern shares only part of its segment
//! - Place static remainders and wildcard tokens under the right node
//! - Keep static children ordered by priority
//!
//! # Design Decisions
//! - Each node owns its children by value; nothing points upward
//! - `indices[i]` is the first `char` of `children[i].segment`
//! - Wildcards live in a single `wild_child` slot, never in `children`
//! - Priority only orders siblings; it never changes what matches

use std::fmt;

use super::error::{RouteError, RouteResult};
use super::params::Params;
use super::path::common_prefix_len;
use super::wildcard::{find_wildcard, wildcard_label, wildcard_name, Wildcard};

/// The role a node plays in the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Entry point of the trie, segment `/`.
    Root,
    /// Literal text.
    Static,
    /// `:name/`, matches one path segment.
    Parameter,
    /// `*name`, matches the remainder of the path.
    CatchAll,
}

pub(crate) struct Node<T> {
    pub(crate) kind: Kind,
    pub(crate) segment: String,
    pub(crate) value: Option<T>,
    /// Number of routes registered at or beneath this node.
    pub(crate) priority: u32,
    pub(crate) indices: Vec<char>,
    pub(crate) children: Vec<Node<T>>,
    pub(crate) wild_child: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    pub(crate) fn new(kind: Kind, segment: &str) -> Self {
        Self {
            kind,
            segment: segment.to_string(),
            value: None,
            priority: 0,
            indices: Vec::new(),
            children: Vec::new(),
            wild_child: None,
        }
    }

    /// Splits this node so its segment becomes `segment[..at]`.
    ///
    /// Everything the node held moves into a single new static child that
    /// carries the unmatched tail. `at` must be a char boundary strictly
    /// inside the segment.
    pub(crate) fn split(&mut self, at: usize) {
        let tail = self.segment.split_off(at);
        let child = Node {
            kind: self.kind,
            segment: tail,
            value: self.value.take(),
            priority: self.priority,
            indices: std::mem::take(&mut self.indices),
            children: std::mem::take(&mut self.children),
            wild_child: self.wild_child.take(),
        };

        if self.kind != Kind::Root {
            self.kind = Kind::Static;
        }
        self.push_child(child);
    }

    /// Position of the static child whose segment starts with `c`.
    pub(crate) fn child_position(&self, c: char) -> Option<usize> {
        self.indices.iter().position(|&i| i == c)
    }

    /// Appends a static child and moves it into priority order.
    pub(crate) fn push_child(&mut self, child: Node<T>) -> usize {
        let first = child.segment.chars().next().unwrap_or_default();
        self.indices.push(first);
        self.children.push(child);
        self.promote_child(self.children.len() - 1)
    }

    /// Bubbles `children[pos]` left past lower-priority siblings.
    ///
    /// Equal priorities never swap, so ties keep registration order.
    /// Returns the child's new position.
    pub(crate) fn promote_child(&mut self, mut pos: usize) -> usize {
        let priority = self.children[pos].priority;
        while pos > 0 && self.children[pos - 1].priority < priority {
            self.children.swap(pos - 1, pos);
            self.indices.swap(pos - 1, pos);
            pos -= 1;
        }
        pos
    }

    /// Inserts `path` (already stripped of everything above this node).
    ///
    /// `route` is the full normalized pattern, used for error reporting.
    /// Priorities are only bumped once the insertion below has succeeded.
    pub(crate) fn insert(&mut self, route: &str, path: &str, value: T) -> RouteResult<()> {
        let common = common_prefix_len(path, &self.segment);
        if common < self.segment.len() {
            self.split(common);
        }

        let rest = &path[common..];
        let Some(next) = rest.chars().next() else {
            if self.value.is_some() {
                return Err(RouteError::DuplicateRoute {
                    path: route.to_string(),
                });
            }
            self.value = Some(value);
            self.priority += 1;
            return Ok(());
        };

        match self.child_position(next) {
            Some(pos) => {
                self.children[pos].insert(route, rest, value)?;
                self.promote_child(pos);
            }
            None => self.insert_wild(route, rest, value)?,
        }

        self.priority += 1;
        Ok(())
    }

    // No static child shares the first character of `path`.
    fn insert_wild(&mut self, route: &str, path: &str, value: T) -> RouteResult<()> {
        let Some(wildcard) = find_wildcard(path)? else {
            let mut leaf = Node::new(Kind::Static, path);
            leaf.value = Some(value);
            leaf.priority = 1;
            self.push_child(leaf);
            return Ok(());
        };

        if wildcard.prefix.is_empty() {
            return self.attach_wild(route, wildcard, value);
        }

        // The carved node is new, so nothing below it can conflict.
        let mut carved = Node::new(Kind::Static, wildcard.prefix);
        carved.attach_wild(route, wildcard, value)?;
        carved.priority += 1;
        self.push_child(carved);
        Ok(())
    }

    fn attach_wild(&mut self, route: &str, wildcard: Wildcard<'_>, value: T) -> RouteResult<()> {
        if let Some(existing) = &self.wild_child {
            if existing.segment != wildcard.token {
                return Err(RouteError::DuplicateParameter {
                    existing: wildcard_label(&existing.segment).to_string(),
                    inserted: wildcard_label(wildcard.token).to_string(),
                });
            }
        }

        let wild = self
            .wild_child
            .get_or_insert_with(|| Box::new(Node::new(wildcard.kind, wildcard.token)));
        wild.insert(route, wildcard.tail, value)
    }

    /// Walks `path` from this node, binding wildcards into `params`.
    ///
    /// A wildcard child is only tried when no static child matches, and once
    /// taken it is never backed out of.
    pub(crate) fn find<'n>(&'n self, path: &str, params: &mut Params) -> Option<&'n T> {
        let mut node = self;
        let mut rest = path.strip_prefix(node.segment.as_str())?;

        loop {
            let Some(next) = rest.chars().next() else {
                return node.value.as_ref();
            };

            if let Some(pos) = node.child_position(next) {
                node = &node.children[pos];
                rest = rest.strip_prefix(node.segment.as_str())?;
                continue;
            }

            let wild = node.wild_child.as_deref()?;
            match wild.kind {
                Kind::Parameter => {
                    let end = rest.find('/').unwrap_or(rest.len());
                    if end == 0 {
                        return None;
                    }
                    params.push(wildcard_name(&wild.segment), &rest[..end]);
                    rest = rest.get(end + 1..).unwrap_or("");
                    node = wild;
                }
                Kind::CatchAll => {
                    let captured = rest.strip_suffix('/').unwrap_or(rest);
                    if captured.is_empty() {
                        return None;
                    }
                    params.push(wildcard_name(&wild.segment), captured);
                    return wild.value.as_ref();
                }
                Kind::Root | Kind::Static => return None,
            }
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("segment", &self.segment)
            .field("priority", &self.priority)
            .field("indices", &self.indices.iter().collect::<String>())
            .field("children", &self.children)
            .field("wild_child", &self.wild_child)
            .field("value", &self.value.is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn root() -> Node<&'static str> {
        Node::new(Kind::Root, "/")
    }

    /// Checks the structural invariants of a subtree.
    pub(crate) fn assert_invariants<T>(node: &Node<T>) {
        assert_eq!(node.indices.len(), node.children.len());
        for (i, child) in node.children.iter().enumerate() {
            assert_eq!(child.segment.chars().next(), Some(node.indices[i]));
            assert_eq!(child.kind, Kind::Static);
            assert!(!child.segment.is_empty());
            if i > 0 {
                assert!(node.children[i - 1].priority >= child.priority);
            }
        }
        let mut firsts = node.indices.clone();
        firsts.sort_unstable();
        firsts.dedup();
        assert_eq!(firsts.len(), node.indices.len(), "duplicate first characters");

        if node.kind == Kind::CatchAll {
            assert!(node.children.is_empty());
            assert!(node.wild_child.is_none());
        }
        if let Some(wild) = &node.wild_child {
            assert!(matches!(wild.kind, Kind::Parameter | Kind::CatchAll));
            assert_invariants(wild);
        }
        node.children.iter().for_each(assert_invariants);
    }

    #[test]
    fn test_split_moves_everything_to_child() {
        let mut node: Node<&str> = Node::new(Kind::Static, "abc/");
        node.value = Some("x");
        node.priority = 3;
        node.wild_child = Some(Box::new(Node::new(Kind::Parameter, ":p/")));

        node.split(1);

        assert_eq!(node.segment, "a");
        assert_eq!(node.kind, Kind::Static);
        assert!(node.value.is_none());
        assert!(node.wild_child.is_none());
        assert_eq!(node.indices, vec!['b']);

        let child = &node.children[0];
        assert_eq!(child.segment, "bc/");
        assert_eq!(child.value, Some("x"));
        assert_eq!(child.priority, 3);
        assert!(child.wild_child.is_some());
    }

    #[test]
    fn test_insert_splits_shared_prefix() {
        let mut root = root();
        root.insert("/team/", "/team/", "a").unwrap();
        root.insert("/test/", "/test/", "b").unwrap();

        assert_eq!(root.children.len(), 1);
        let te = &root.children[0];
        assert_eq!(te.segment, "te");
        assert_eq!(te.priority, 2);
        assert_eq!(te.indices, vec!['a', 's']);
        assert_invariants(&root);
    }

    #[test]
    fn test_priority_reorders_children() {
        let mut root: Node<i32> = Node::new(Kind::Root, "/");
        root.insert("/a/", "/a/", 1).unwrap();
        root.insert("/b/", "/b/", 2).unwrap();
        root.insert("/b/x/", "/b/x/", 3).unwrap();

        // `b/` now carries two routes and moves ahead of `a/`.
        assert_eq!(root.indices, vec!['b', 'a']);
        assert_eq!(root.children[0].priority, 2);
        assert_eq!(root.children[1].priority, 1);
        assert_eq!(root.priority, 3);
        assert_invariants(&root);
    }

    #[test]
    fn test_equal_priorities_keep_registration_order() {
        let mut root: Node<usize> = Node::new(Kind::Root, "/");
        for (i, p) in ["/c/", "/a/", "/b/"].iter().enumerate() {
            root.insert(p, p, i).unwrap();
        }
        assert_eq!(root.indices, vec!['c', 'a', 'b']);
    }

    #[test]
    fn test_wildcard_prefix_is_carved() {
        let mut root = root();
        root.insert("/files/:name/", "/files/:name/", "f").unwrap();

        let files = &root.children[0];
        assert_eq!(files.segment, "files/");
        assert_eq!(files.priority, 1);
        let wild = files.wild_child.as_ref().unwrap();
        assert_eq!(wild.kind, Kind::Parameter);
        assert_eq!(wild.segment, ":name/");
        assert_eq!(wild.value, Some("f"));
        assert_invariants(&root);
    }

    #[test]
    fn test_failed_insert_keeps_priorities() {
        let mut root = root();
        root.insert("/a/:x/", "/a/:x/", "x").unwrap();
        assert!(root.insert("/a/:y/", "/a/:y/", "y").is_err());
        assert_eq!(root.priority, 1);
        assert_eq!(root.children[0].priority, 1);
    }

    #[test]
    fn test_parameter_against_catch_all_names_both_tokens() {
        let mut root = root();
        root.insert("/:p/", "/:p/", "param").unwrap();
        match root.insert("/*p", "/*p", "rest").unwrap_err() {
            RouteError::DuplicateParameter { existing, inserted } => {
                assert_eq!(existing, ":p");
                assert_eq!(inserted, "*p");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_debug_does_not_need_debug_values() {
        struct Opaque;
        let mut root: Node<Opaque> = Node::new(Kind::Root, "/");
        root.insert("/a/", "/a/", Opaque).unwrap();
        let out = format!("{:?}", root);
        assert!(out.contains("segment: \"a/\""));
        assert!(out.contains("value: true"));
    }
}
