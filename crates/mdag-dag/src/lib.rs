//! Merkle-DAG construction for mdag.
//!
//! [`add`] turns a file or directory tree into a graph of content-addressed
//! [`Object`]s. Files larger than one chunk are split into leaf blobs held
//! together by indirect list objects; directories become tree objects. Every
//! object is encoded canonically ([`codec`]), hashed with the caller's
//! [`Hasher`](mdag_crypto::Hasher), and written to the caller's
//! [`KvStore`](mdag_store::KvStore) under its digest before its parent
//! refers to it. The returned root digest identifies the whole tree.
//!
//! # Key Types
//!
//! - [`Node`], [`FileNode`], [`DirNode`] -- the input tree capability
//! - [`Object`], [`Link`] -- the persisted graph
//! - [`ChunkPlan`] -- chunk count and indirection height for a file
//! - [`DagBuilder`] -- the recursive bottom-up constructor
//! - [`DagConfig`] -- chunk size and fan-out

pub mod add;
pub mod builder;
pub mod codec;
pub mod config;
pub mod error;
pub mod mem;
pub mod node;
pub mod object;
pub mod planner;

pub use add::{add, add_with_config, AddSummary};
pub use builder::{Built, DagBuilder};
pub use config::{DagConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_FANOUT};
pub use error::{DagError, DagResult};
pub use mem::{MemDir, MemFile, MemNode};
pub use node::{Children, DirNode, FileNode, Node, NodeType};
pub use object::{Link, LinkKind, Object, ObjectKind};
pub use planner::ChunkPlan;
