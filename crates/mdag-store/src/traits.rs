use std::sync::Arc;

use mdag_types::Digest;

use crate::error::StoreResult;

/// Content-addressed, write-only key-value store.
///
/// All implementations must satisfy these invariants:
/// - `key` is the digest of `value`; the store does not recompute or verify it.
/// - Repeated puts of the same key/value pair succeed and change nothing.
/// - Puts are safe to issue concurrently from multiple threads.
/// - All I/O errors are returned, never swallowed.
pub trait KvStore: Send + Sync {
    /// Persist `value` under `key`.
    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        (**self).put(key, value)
    }
}
