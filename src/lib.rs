//! Dirlist - list every entry under a directory, grouped by depth

use std::path::Path;

pub mod error;
pub mod output;
pub mod store;
pub mod walker;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::{Error, Result};
pub use output::{write_listing, write_listing_file};
pub use store::{Entry, EntryList, Level, Levels};
pub use walker::{
    DirSource, EntryKind, FsSource, SkipReason, SkippedPath, TreeWalker, WalkOutcome, WalkerConfig,
};

/// Walk `root` and regroup the result by depth, ready for output.
pub fn list_directory(root: &Path, config: &WalkerConfig) -> Result<WalkOutcome> {
    let mut outcome = TreeWalker::new(config.clone()).walk(root)?;
    outcome.entries.reorder_by_depth();
    Ok(outcome)
}
