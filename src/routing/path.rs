//! Path normalization helpers.
//!
//! Both registration and lookup run every path through [`clean_path`] before
//! touching the trie. Skipping it on one side makes matches fail silently.

/// Collapses runs of `/` and guarantees a leading and trailing `/`.
///
/// ```
/// use trie_router::routing::path::clean_path;
///
/// assert_eq!(clean_path("a//b"), "/a/b/");
/// assert_eq!(clean_path(""), "/");
/// ```
pub fn clean_path(path: &str) -> String {
    let mut cleaned = String::with_capacity(path.len() + 2);
    cleaned.push('/');

    for c in path.chars() {
        if c == '/' && cleaned.ends_with('/') {
            continue;
        }
        cleaned.push(c);
    }

    if !cleaned.ends_with('/') {
        cleaned.push('/');
    }

    cleaned
}

/// Length in bytes of the longest common prefix of `a` and `b`.
///
/// Compares whole `char`s, so the result always falls on a character
/// boundary of both strings.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            break;
        }
        len += x.len_utf8();
    }
    len
}
