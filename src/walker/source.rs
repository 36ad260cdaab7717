//! Filesystem access used by the walker
//!
//! `DirSource` is the seam between traversal and the host filesystem. The
//! walker only ever lists children, classifies a path, and resolves a
//! directory's identity; `FsSource` does each with a single `std::fs` call.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a path points at, without following a final symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Symlink { to_dir: bool },
    Other,
}

impl EntryKind {
    /// True for directories and for symlinks that resolve to one.
    pub fn is_dir_like(self) -> bool {
        matches!(self, EntryKind::Dir | EntryKind::Symlink { to_dir: true })
    }
}

/// Children of one directory. Each entry is read on its own, so one bad
/// entry does not hide its siblings.
pub type Children = Vec<io::Result<OsString>>;

/// Directory enumeration and metadata queries.
pub trait DirSource {
    /// Names of the immediate children of `dir`, excluding `.` and `..`.
    /// The outer error means `dir` itself could not be listed.
    fn read_children(&self, dir: &Path) -> io::Result<Children>;

    /// Classify `path`. A symlink is reported as a symlink, not as its target.
    fn kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// Canonical identity of a directory, used to spot symlink cycles.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf>;
}

/// `DirSource` backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DirSource for FsSource {
    fn read_children(&self, dir: &Path) -> io::Result<Children> {
        Ok(fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect())
    }

    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        let file_type = fs::symlink_metadata(path)?.file_type();
        let kind = if file_type.is_symlink() {
            let to_dir = fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false);
            EntryKind::Symlink { to_dir }
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        Ok(kind)
    }

    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}
