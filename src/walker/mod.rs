//! Tree Walker
//!
//! Recursive, depth-first traversal that records every entry below a root
//! directory into an `EntryList`.
//!
//! - `TreeWalker`: drives the traversal and collects skipped paths
//! - `DirSource`: filesystem seam, with `FsSource` as the real implementation

mod config;
mod path;
mod source;
mod walk;

pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PATH_LEN, WalkerConfig};
pub use path::{join_path, normalize_root};
pub use source::{Children, DirSource, EntryKind, FsSource};
pub use walk::{SkipReason, SkippedPath, TreeWalker, WalkOutcome};
