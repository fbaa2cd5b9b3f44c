//! Entry point: add a file or directory tree to a store.

use serde::Serialize;
use tracing::{debug, debug_span};

use mdag_crypto::Hasher;
use mdag_store::KvStore;
use mdag_types::Digest;

use crate::builder::DagBuilder;
use crate::config::DagConfig;
use crate::error::DagResult;
use crate::node::Node;
use crate::object::ObjectKind;

/// Outcome of a successful [`add_with_config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddSummary {
    /// Digest of the root object.
    pub root: Digest,
    /// Kind of the root object.
    pub root_kind: ObjectKind,
    /// Store writes issued, including repeats of identical objects.
    pub objects_written: u64,
    /// Leaf blobs written.
    pub leaves: u64,
    /// File content bytes written into leaves.
    pub content_bytes: u64,
    /// Tallest list stack in any one file.
    pub max_height: u32,
}

/// Add `root` to `store` with the default chunking parameters and return the
/// root digest.
///
/// Every object of the tree is persisted before this returns `Ok`. On error
/// no digest is returned; objects written before the failure stay in the
/// store, which is safe because writes are idempotent and retrying the call
/// rewrites the same keys.
pub fn add<S, H>(store: &S, root: &dyn Node, hasher: &mut H) -> DagResult<Digest>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    add_with_config(store, root, hasher, &DagConfig::default()).map(|summary| summary.root)
}

/// Add `root` to `store` using `config` and report what was written.
pub fn add_with_config<S, H>(
    store: &S,
    root: &dyn Node,
    hasher: &mut H,
    config: &DagConfig,
) -> DagResult<AddSummary>
where
    S: KvStore + ?Sized,
    H: Hasher + ?Sized,
{
    let span = debug_span!("add", root = root.name(), node_type = %root.node_type());
    let _guard = span.enter();

    let mut builder = DagBuilder::new(store, hasher, config)?;
    let built = builder.build_node(root)?;
    let stats = builder.stats();

    let summary = AddSummary {
        root: built.digest,
        root_kind: built.object.kind,
        objects_written: stats.objects_written,
        leaves: stats.leaves,
        content_bytes: stats.content_bytes,
        max_height: stats.max_height,
    };
    debug!(
        root = %summary.root.short_hex(),
        kind = %summary.root_kind,
        objects = summary.objects_written,
        bytes = summary.content_bytes,
        "add complete"
    );
    Ok(summary)
}
