//! Entry record

use std::fmt;

/// One filesystem path and its traversal depth.
///
/// `depth` counts path segments below the traversal root, with the root itself
/// at depth 1. Entries never change once created; only their position in an
/// `EntryList` moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    path: String,
    depth: usize,
}

impl Entry {
    /// Create an entry. `depth` is stored as given; callers use 1 for the root.
    pub fn new(path: impl Into<String>, depth: usize) -> Self {
        Self {
            path: path.into(),
            depth,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.path, self.depth)
    }
}
