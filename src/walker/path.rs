//! POSIX-style path assembly
//!
//! Paths are kept as `String`s joined with a single `/`, so the recorded text
//! is exactly what ends up in the listing.

const SEPARATOR: char = '/';

/// Strip trailing separators, keeping a lone `/`.
pub fn normalize_root(root: &str) -> &str {
    let trimmed = root.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && root.starts_with(SEPARATOR) {
        "/"
    } else {
        trimmed
    }
}

/// Join a directory path and a child name with exactly one separator.
pub fn join_path(parent: &str, name: &str) -> String {
    let mut path = String::with_capacity(parent.len() + name.len() + 1);
    path.push_str(parent);
    if !parent.ends_with(SEPARATOR) {
        path.push(SEPARATOR);
    }
    path.push_str(name);
    path
}
