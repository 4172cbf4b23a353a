//! Wildcard token scanning.
//!
//! # Responsibilities
//! - Find the first `:name` or `*name` token in a (normalized) path suffix
//! - Reject segments carrying more than one marker
//! - Reject catch-alls that are not the last token of a route
//!
//! # Design Decisions
//! - Parameter tokens keep their trailing `/` as a terminator sentinel
//! - Catch-all tokens drop it; they consume the rest of the path
//! - All syntax errors surface here, so a pattern can be checked before the
//!   trie is mutated

use super::error::{RouteError, RouteResult};
use super::node::Kind;

/// A wildcard token located inside a path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Wildcard<'a> {
    /// `Kind::Parameter` or `Kind::CatchAll`.
    pub kind: Kind,
    /// Literal text before the marker.
    pub prefix: &'a str,
    /// `:name/` or `*name`.
    pub token: &'a str,
    /// Path remaining after the token.
    pub suffix: &'a str,
    /// Text to insert at the wildcard node: the token followed by the suffix.
    pub tail: &'a str,
}

/// Finds the first wildcard in `path`, if any.
pub(crate) fn find_wildcard(path: &str) -> RouteResult<Option<Wildcard<'_>>> {
    let mut start: Option<(usize, Kind)> = None;

    for (i, c) in path.char_indices() {
        match c {
            ':' | '*' => {
                if let Some((s, _)) = start {
                    let end = path[i..].find('/').map_or(path.len(), |e| i + e);
                    return Err(RouteError::MultipleWildcards {
                        segment: path[s..end].to_string(),
                    });
                }
                let kind = if c == ':' { Kind::Parameter } else { Kind::CatchAll };
                start = Some((i, kind));
            }
            '/' => {
                if let Some((s, kind)) = start {
                    return build(path, s, i, kind).map(Some);
                }
            }
            _ => {}
        }
    }

    match start {
        Some((s, kind)) => build(path, s, path.len(), kind).map(Some),
        None => Ok(None),
    }
}

/// Checks a whole pattern for wildcard syntax errors without touching a trie.
pub(crate) fn validate_pattern(path: &str) -> RouteResult<()> {
    let mut rest = path;
    while let Some(wildcard) = find_wildcard(rest)? {
        rest = wildcard.suffix;
    }
    Ok(())
}

/// Name of a wildcard from its stored segment (`:id/` -> `id`, `*rest` -> `rest`).
pub(crate) fn wildcard_name(segment: &str) -> &str {
    let name = segment.get(1..).unwrap_or("");
    name.strip_suffix('/').unwrap_or(name)
}

/// Wildcard as written in a pattern (`:id/` -> `:id`, `*rest` -> `*rest`).
pub(crate) fn wildcard_label(segment: &str) -> &str {
    segment.strip_suffix('/').unwrap_or(segment)
}

// `end` is the index of the `/` closing the token, or `path.len()`.
fn build(path: &str, start: usize, end: usize, kind: Kind) -> RouteResult<Wildcard<'_>> {
    if end == start + 1 {
        return Err(RouteError::UnnamedWildcard {
            segment: path[start..end].to_string(),
        });
    }

    let after = (end + 1).min(path.len());
    let prefix = &path[..start];

    match kind {
        Kind::CatchAll => {
            let token = &path[start..end];
            let suffix = &path[after..];
            if !suffix.is_empty() {
                return Err(RouteError::RouteAfterCatchAll {
                    segment: token.to_string(),
                });
            }
            Ok(Wildcard {
                kind,
                prefix,
                token,
                suffix,
                tail: token,
            })
        }
        _ => Ok(Wildcard {
            kind,
            prefix,
            token: &path[start..after],
            suffix: &path[after..],
            tail: &path[start..],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_wildcard() {
        assert_eq!(find_wildcard("/a/b/").unwrap(), None);
        assert_eq!(find_wildcard("").unwrap(), None);
    }

    #[test]
    fn test_parameter() {
        let w = find_wildcard("user/:id/posts/").unwrap().unwrap();
        assert_eq!(w.kind, Kind::Parameter);
        assert_eq!(w.prefix, "user/");
        assert_eq!(w.token, ":id/");
        assert_eq!(w.suffix, "posts/");
        assert_eq!(w.tail, ":id/posts/");
    }

    #[test]
    fn test_parameter_mid_segment() {
        let w = find_wildcard("file-:name/").unwrap().unwrap();
        assert_eq!(w.prefix, "file-");
        assert_eq!(w.token, ":name/");
        assert_eq!(w.suffix, "");
    }

    #[test]
    fn test_catch_all() {
        let w = find_wildcard("static/*file/").unwrap().unwrap();
        assert_eq!(w.kind, Kind::CatchAll);
        assert_eq!(w.prefix, "static/");
        assert_eq!(w.token, "*file");
        assert_eq!(w.suffix, "");
        assert_eq!(w.tail, "*file");
    }

    #[test]
    fn test_route_after_catch_all() {
        let err = find_wildcard("c/*rest/more/").unwrap_err();
        assert!(matches!(err, RouteError::RouteAfterCatchAll { ref segment } if segment == "*rest"));
    }

    #[test]
    fn test_multiple_markers_in_segment() {
        let err = find_wildcard("/:a:b/").unwrap_err();
        assert!(matches!(err, RouteError::MultipleWildcards { ref segment } if segment == ":a:b"));

        let err = find_wildcard("/:a*b/c/").unwrap_err();
        assert!(matches!(err, RouteError::MultipleWildcards { .. }));
    }

    #[test]
    fn test_markers_in_separate_segments() {
        assert!(validate_pattern("/:a/:b/*c/").is_ok());
        assert!(validate_pattern("/:a/*b/c/").is_err());
    }

    #[test]
    fn test_unnamed_wildcard() {
        assert!(matches!(
            find_wildcard("/:/").unwrap_err(),
            RouteError::UnnamedWildcard { .. }
        ));
        assert!(matches!(
            find_wildcard("/*/").unwrap_err(),
            RouteError::UnnamedWildcard { .. }
        ));
    }

    #[test]
    fn test_wildcard_name() {
        assert_eq!(wildcard_name(":id/"), "id");
        assert_eq!(wildcard_name("*rest"), "rest");
        assert_eq!(wildcard_name(""), "");
    }

    #[test]
    fn test_wildcard_label() {
        assert_eq!(wildcard_label(":id/"), ":id");
        assert_eq!(wildcard_label("*rest"), "*rest");
    }
}
