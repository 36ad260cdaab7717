//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled with the `test-utils` feature (tests and benchmarks).

use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped. Any directory locked with
/// [`TestTree::lock`] has its permissions restored first so cleanup succeeds.
pub struct TestTree {
    dir: TempDir,
    locked: Vec<PathBuf>,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            locked: Vec::new(),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The root path as the walker will record it.
    pub fn root_str(&self) -> &str {
        self.dir.path().to_str().expect("temp dir path is not UTF-8")
    }

    /// Absolute path of `relative` inside the tree, as a string.
    pub fn abs(&self, relative: &str) -> String {
        format!("{}/{}", self.root_str(), relative)
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a symlink at `path` pointing at `target` (used verbatim).
    pub fn add_symlink(&self, target: &str, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }

    /// Remove all permissions from a directory.
    ///
    /// Returns false when the directory is still listable afterwards (running
    /// as root), so callers can skip assertions that rely on the lock.
    pub fn lock(&mut self, path: &str) -> bool {
        let full_path = self.dir.path().join(path);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(0o000))
            .expect("Failed to set permissions");
        self.locked.push(full_path.clone());
        fs::read_dir(&full_path).is_err()
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestTree {
    fn drop(&mut self) {
        for path in &self.locked {
            let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
        }
    }
}
