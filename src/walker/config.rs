//! Configuration types for the tree walker

/// POSIX `PATH_MAX`. It counts the terminating NUL, so recorded paths are at
/// most one byte shorter.
pub const DEFAULT_MAX_PATH_LEN: usize = 4096;

/// Deepest level the walker will descend into before giving up on a branch.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Directories at this depth are recorded but not descended into.
    /// The root is depth 1.
    pub max_depth: usize,
    /// Descend into symlinked directories. Links that resolve to a directory
    /// already on the current descent path are recorded but not followed.
    pub follow_symlinks: bool,
    /// Children whose assembled path is this many bytes or longer are skipped.
    pub max_path_len: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            follow_symlinks: false,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}
