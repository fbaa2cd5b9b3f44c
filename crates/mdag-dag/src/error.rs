//! Error types for DAG construction.

use mdag_store::StoreError;

use crate::node::NodeType;

/// Errors that can occur while building and persisting a DAG.
///
/// Any of these aborts the whole [`add`](crate::add) call. Objects persisted
/// before the failure stay in the store.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// The store rejected a write.
    #[error("store write failed: {0}")]
    Store(#[from] StoreError),

    /// An object could not be canonically encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A node reported a type the builder does not handle, or claimed to be a
    /// file or directory without exposing that capability.
    #[error("unsupported node {name:?}: type {node_type}")]
    UnsupportedNode {
        /// The node's reported name.
        name: String,
        /// The node's reported type.
        node_type: NodeType,
    },

    /// A node's content or listing could not be read.
    #[error("failed to read node {name:?}: {source}")]
    NodeRead {
        /// The node's reported name.
        name: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A directory's listing yielded an entry that could not be read. The
    /// source carries whatever detail the node adapter supplies about the
    /// entry, such as its path.
    #[error("failed to read an entry of directory {dir:?}: {source}")]
    DirEntry {
        /// The parent directory's reported name.
        dir: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Chunk size or fan-out out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for DAG results.
pub type DagResult<T> = Result<T, DagError>;
