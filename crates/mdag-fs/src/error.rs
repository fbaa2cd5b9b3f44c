//! Error types for the filesystem crate.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while opening a path.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Metadata for the path could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path's final component is not valid UTF-8.
    #[error("file name is not valid UTF-8: {}", .0.display())]
    InvalidName(PathBuf),
}

/// Convenience alias for filesystem results.
pub type FsResult<T> = Result<T, FsError>;
