//! Filesystem-backed input nodes for mdag.
//!
//! [`FsNode::open`] inspects a path without following symlinks and returns a
//! node the DAG builder can consume. Directory children are listed in
//! byte-wise file-name order so the same tree always yields the same graph.
//!
//! # Key Types
//!
//! - [`FsNode`] -- any entry on disk
//! - [`FsFile`] -- a regular file, read whole on demand
//! - [`FsDir`] -- a directory, listed lazily with `walkdir`
//! - [`FsError`] -- failures opening a path

pub mod error;
pub mod node;

pub use error::{FsError, FsResult};
pub use node::{FsDir, FsFile, FsNode};
