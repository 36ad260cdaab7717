//! Error types for dirlist
//!
//! Only failures that stop a whole run live here. Problems with a single entry
//! during traversal are reported through `SkippedPath` instead.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a listing run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("out of memory while growing the entry list: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("cannot access '{}': {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("'{}' is not a valid UTF-8 path", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("cannot write '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for dirlist operations
pub type Result<T> = std::result::Result<T, Error>;
