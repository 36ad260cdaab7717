//! TreeWalker - depth-first population of an `EntryList`

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::store::{Entry, EntryList};

use super::config::WalkerConfig;
use super::path::{join_path, normalize_root};
use super::source::{Children, DirSource, EntryKind, FsSource};

/// Why an entry was left out, or recorded without descending into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Directory could not be listed. The entry is recorded, its contents are not.
    Unreadable(io::ErrorKind),
    /// One directory entry could not be read. Its siblings are still walked;
    /// the path is that of the containing directory.
    UnreadableEntry(io::ErrorKind),
    /// Metadata query failed. The entry is recorded as a leaf.
    Unclassifiable(io::ErrorKind),
    /// Child name is not valid UTF-8. The entry is not recorded.
    NonUtf8Name,
    /// Assembled path reaches the configured limit. The entry is not recorded.
    PathTooLong { len: usize, max: usize },
    /// Directory sits at the depth cap. The entry is recorded, its contents are not.
    DepthLimit { max: usize },
    /// Followed symlink leads back to a directory being walked.
    SymlinkCycle,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(kind) => write!(f, "cannot read directory ({})", kind),
            SkipReason::UnreadableEntry(kind) => write!(f, "cannot read an entry ({})", kind),
            SkipReason::Unclassifiable(kind) => write!(f, "cannot read metadata ({})", kind),
            SkipReason::NonUtf8Name => write!(f, "name is not valid UTF-8"),
            SkipReason::PathTooLong { len, max } => {
                write!(f, "path is {} bytes, limit is {}", len, max)
            }
            SkipReason::DepthLimit { max } => write!(f, "depth limit {} reached", max),
            SkipReason::SymlinkCycle => write!(f, "symlink cycle"),
        }
    }
}

/// A path the walker could not fully process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path: String,
    pub reason: SkipReason,
}

/// Result of a walk: the populated list plus everything that was skipped.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub entries: EntryList,
    pub skipped: Vec<SkippedPath>,
}

/// Depth-first walker that records every entry under a root.
///
/// Each child is recorded before its subtree is visited, and one subtree is
/// finished before the next sibling is looked at. Sibling read order does not
/// matter because entries go in through `insert_sorted`.
pub struct TreeWalker<S = FsSource> {
    config: WalkerConfig,
    source: S,
}

impl TreeWalker<FsSource> {
    pub fn new(config: WalkerConfig) -> Self {
        Self::with_source(config, FsSource)
    }
}

impl<S: DirSource> TreeWalker<S> {
    pub fn with_source(config: WalkerConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Walk `root`, which must be a readable directory.
    ///
    /// Problems with the root itself are errors. Problems below it are
    /// logged and collected in `WalkOutcome::skipped`.
    pub fn walk(&self, root: &Path) -> Result<WalkOutcome> {
        let root_str = root
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(root.to_path_buf()))?;
        let root_str = normalize_root(root_str);
        let root_path = Path::new(root_str);

        let kind = self.source.kind(root_path).map_err(|source| Error::Access {
            path: root_path.to_path_buf(),
            source,
        })?;
        if !kind.is_dir_like() {
            return Err(Error::NotADirectory(root_path.to_path_buf()));
        }
        let names = self
            .source
            .read_children(root_path)
            .map_err(|source| Error::Access {
                path: root_path.to_path_buf(),
                source,
            })?;

        let mut walk = Walk {
            config: &self.config,
            source: &self.source,
            outcome: WalkOutcome::default(),
            ancestors: Vec::new(),
        };
        walk.outcome.entries.insert_sorted(Entry::new(root_str, 1))?;

        if self.config.follow_symlinks {
            let identity = self
                .source
                .resolve(root_path)
                .unwrap_or_else(|_| root_path.to_path_buf());
            walk.ancestors.push(identity);
        }
        if self.config.max_depth <= 1 {
            let max = self.config.max_depth;
            walk.skip(root_str.to_string(), SkipReason::DepthLimit { max });
        } else {
            walk.visit_children(root_str, names, 1)?;
        }

        info!(
            root = root_str,
            entries = walk.outcome.entries.len(),
            skipped = walk.outcome.skipped.len(),
            "walk finished"
        );
        Ok(walk.outcome)
    }
}

/// Per-run traversal state. Depth travels as an argument.
struct Walk<'a, S> {
    config: &'a WalkerConfig,
    source: &'a S,
    outcome: WalkOutcome,
    /// Resolved directories on the current descent path; only kept when
    /// following symlinks.
    ancestors: Vec<PathBuf>,
}

impl<S: DirSource> Walk<'_, S> {
    fn visit_children(&mut self, dir: &str, names: Children, depth: usize) -> Result<()> {
        debug!(dir, depth, children = names.len(), "visiting directory");

        let child_depth = depth + 1;
        for name in names {
            let name = match name {
                Ok(name) => name,
                Err(e) => {
                    self.skip(dir.to_string(), SkipReason::UnreadableEntry(e.kind()));
                    continue;
                }
            };
            let Some(name_str) = name.to_str() else {
                self.skip(join_path(dir, &name.to_string_lossy()), SkipReason::NonUtf8Name);
                continue;
            };

            let path = join_path(dir, name_str);
            if path.len() >= self.config.max_path_len {
                let reason = SkipReason::PathTooLong {
                    len: path.len(),
                    max: self.config.max_path_len,
                };
                self.skip(path, reason);
                continue;
            }

            let kind = match self.source.kind(Path::new(&path)) {
                Ok(kind) => Some(kind),
                Err(e) => {
                    self.skip(path.clone(), SkipReason::Unclassifiable(e.kind()));
                    None
                }
            };

            self.outcome
                .entries
                .insert_sorted(Entry::new(path.as_str(), child_depth))?;

            match kind {
                Some(EntryKind::Dir) => self.descend(path, child_depth)?,
                Some(EntryKind::Symlink { to_dir: true }) if self.config.follow_symlinks => {
                    self.descend(path, child_depth)?
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Visit a directory that has already been recorded at `depth`.
    fn descend(&mut self, dir: String, depth: usize) -> Result<()> {
        if depth >= self.config.max_depth {
            let max = self.config.max_depth;
            self.skip(dir, SkipReason::DepthLimit { max });
            return Ok(());
        }

        if !self.config.follow_symlinks {
            return self.visit_dir(dir, depth);
        }

        let identity = match self.source.resolve(Path::new(&dir)) {
            Ok(identity) => identity,
            Err(e) => {
                self.skip(dir, SkipReason::Unreadable(e.kind()));
                return Ok(());
            }
        };
        if self.ancestors.contains(&identity) {
            self.skip(dir, SkipReason::SymlinkCycle);
            return Ok(());
        }

        self.ancestors.push(identity);
        let result = self.visit_dir(dir, depth);
        self.ancestors.pop();
        result
    }

    fn visit_dir(&mut self, dir: String, depth: usize) -> Result<()> {
        match self.source.read_children(Path::new(&dir)) {
            Ok(names) => self.visit_children(&dir, names, depth),
            Err(e) => {
                self.skip(dir, SkipReason::Unreadable(e.kind()));
                Ok(())
            }
        }
    }

    fn skip(&mut self, path: String, reason: SkipReason) {
        warn!(path = %path, reason = %reason, "skipping");
        self.outcome.skipped.push(SkippedPath { path, reason });
    }
}
