//! Content-addressed object storage for mdag.
//!
//! The DAG builder persists every object it constructs through the
//! [`KvStore`] trait, keyed by the object's [`Digest`](mdag_types::Digest).
//! The builder only ever writes; the read accessors on the concrete backends
//! exist for tooling and tests.
//!
//! # Storage Backends
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsKvStore`] -- one file per object under a two-character fan-out
//!   directory, written atomically
//!
//! # Design Rules
//!
//! 1. Values are immutable once written (content-addressing guarantees this).
//! 2. `put` is idempotent: writing an existing key is a successful no-op.
//! 3. Concurrent puts are safe, for distinct and for identical keys.
//! 4. The store never interprets values. It is a pure key-value store.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsKvStore;
pub use memory::InMemoryKvStore;
pub use traits::KvStore;
