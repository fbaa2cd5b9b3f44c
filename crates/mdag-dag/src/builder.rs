//! Recursive bottom-up construction of the object graph.
//!
//! [`DagBuilder`] walks the input tree depth-first. Every object is encoded,
//! hashed, and written to the store as soon as it is complete; a parent only
//! links to children that are already persisted. Each build step returns a
//! [`Built`] value (object, digest, bytes spanned) rather than mutating
//! shared accumulators.
//!
//! # File layout
//!
//! A file of at most one chunk is a single blob. A larger file is planned by
//! [`ChunkPlan`] and partitioned level by level: a level of height 1 gathers
//! up to `max_fanout` leaf blobs, a higher level gathers up to `max_fanout`
//! sub-objects of the level below. At height 1, a remainder that fits in one
//! chunk is returned as a bare blob instead of a single-link list. Links are
//! always in ascending byte-offset order, and a sub-object is tagged by its
//! own kind: such a remainder blob is linked from a list at height 2 or more
//! with a `Blob` tag, not a `List` tag. The tag always says how to decode the
//! target.
//!
//! # Directory layout
//!
//! A tree links its children in iteration order. A file child's link size is
//! the number of bytes actually read into its object; a directory child's
//! link size is the size the node reports, taken as is.

use bytes::Bytes;
use tracing::trace;

use mdag_crypto::Hasher;
use mdag_store::KvStore;
use mdag_types::Digest;

use crate::codec;
use crate::config::DagConfig;
use crate::error::{DagError, DagResult};
use crate::node::{DirNode, FileNode, Node, NodeType};
use crate::object::{Link, LinkKind, Object};
use crate::planner::ChunkPlan;

/// A persisted object together with its digest and span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Built {
    /// The object as persisted.
    pub object: Object,
    /// Digest of the object's canonical encoding; its store key.
    pub digest: Digest,
    /// Content bytes covered. For trees, the directory's reported size.
    pub span: u64,
}

impl Built {
    /// Tag a parent records for this object.
    pub fn link_kind(&self) -> LinkKind {
        self.object.kind.link_kind()
    }

    /// An unnamed chunk link to this object.
    fn chunk_link(&self) -> Link {
        Link::chunk(self.digest, self.span, self.link_kind())
    }
}

/// Counters gathered while building.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Store writes issued, including repeated writes of identical objects.
    pub objects_written: u64,
    /// Leaf blobs written.
    pub leaves: u64,
    /// File content bytes written into leaves.
    pub content_bytes: u64,
    /// Tallest list stack seen in any one file.
    pub max_height: u32,
}

/// Recursive object constructor over a store and a hasher.
pub struct DagBuilder<'a, S: ?Sized, H: ?Sized> {
    store: &'a S,
    hasher: &'a mut H,
    config: &'a DagConfig,
    stats: BuildStats,
}

impl<'a, S, H> DagBuilder<'a, S, H>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    /// Create a builder. Fails if `config` is out of range.
    pub fn new(store: &'a S, hasher: &'a mut H, config: &'a DagConfig) -> DagResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            hasher,
            config,
            stats: BuildStats::default(),
        })
    }

    /// Counters so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Build any node, dispatching on its reported type.
    pub fn build_node(&mut self, node: &dyn Node) -> DagResult<Built> {
        match node.node_type() {
            NodeType::File => {
                let file = node.as_file().ok_or_else(|| unsupported(node))?;
                self.build_file(file)
            }
            NodeType::Dir => {
                let dir = node.as_dir().ok_or_else(|| unsupported(node))?;
                self.build_dir(dir)
            }
            NodeType::Symlink | NodeType::Other => Err(unsupported(node)),
        }
    }

    /// Build a file: one blob, or a stack of lists over its chunks.
    pub fn build_file(&mut self, file: &dyn FileNode) -> DagResult<Built> {
        let bytes = file.bytes().map_err(|source| DagError::NodeRead {
            name: file.name().to_string(),
            source,
        })?;
        let plan = ChunkPlan::new(bytes.len() as u64, self.config);
        if plan.is_single_leaf() {
            return self.build_leaf(bytes);
        }

        self.stats.max_height = self.stats.max_height.max(plan.height);
        let built = self.build_level(&bytes, 0, plan.height)?;
        debug_assert_eq!(built.span, plan.len, "top level must cover the whole file");
        Ok(built)
    }

    /// Build a directory tree from its children, in iteration order.
    pub fn build_dir(&mut self, dir: &dyn DirNode) -> DagResult<Built> {
        let children = dir.children().map_err(|source| DagError::NodeRead {
            name: dir.name().to_string(),
            source,
        })?;

        let mut tree = Object::tree();
        for child in children {
            let child = child.map_err(|source| DagError::DirEntry {
                dir: dir.name().to_string(),
                source,
            })?;
            let built = self.build_node(&*child)?;
            let size = match child.node_type() {
                NodeType::Dir => child.size(),
                _ => built.span,
            };
            tree.push_link(Link::new(child.name(), built.digest, size, built.link_kind()));
        }
        self.persist(tree, dir.size())
    }

    /// One level of a multi-chunk file starting at `offset`.
    fn build_level(&mut self, bytes: &Bytes, offset: usize, height: u32) -> DagResult<Built> {
        let chunk_size = self.config.chunk_size;
        let end = bytes.len();
        if height == 1 && end - offset <= chunk_size {
            return self.build_leaf(bytes.slice(offset..));
        }

        let mut list = Object::list();
        let mut pos = offset;
        for _ in 0..self.config.max_fanout {
            if pos >= end {
                break;
            }
            let child = if height > 1 {
                self.build_level(bytes, pos, height - 1)?
            } else {
                let chunk_end = end.min(pos + chunk_size);
                self.build_leaf(bytes.slice(pos..chunk_end))?
            };
            pos += child.span as usize;
            list.push_link(child.chunk_link());
        }
        let span = (pos - offset) as u64;
        self.persist(list, span)
    }

    fn build_leaf(&mut self, chunk: Bytes) -> DagResult<Built> {
        let span = chunk.len() as u64;
        self.stats.leaves += 1;
        self.stats.content_bytes += span;
        self.persist(Object::blob(chunk.to_vec()), span)
    }

    /// Encode, hash, and write `object`.
    fn persist(&mut self, object: Object, span: u64) -> DagResult<Built> {
        let (digest, encoded) = codec::encode_and_hash(&object, &mut *self.hasher)?;
        self.store.put(&digest, &encoded)?;
        self.stats.objects_written += 1;
        trace!(
            digest = %digest.short_hex(),
            kind = %object.kind,
            links = object.links.len(),
            span,
            "object persisted"
        );
        Ok(Built {
            object,
            digest,
            span,
        })
    }
}

fn unsupported(node: &dyn Node) -> DagError {
    DagError::UnsupportedNode {
        name: node.name().to_string(),
        node_type: node.node_type(),
    }
}
