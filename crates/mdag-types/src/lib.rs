//! Foundation types for mdag.
//!
//! Every object in an mdag graph is identified by a [`Digest`]: the hash of
//! the object's canonical encoding. The digest is the key the object is
//! persisted under and the value a parent link refers to it by.

pub mod digest;
pub mod error;

pub use digest::{Digest, DIGEST_LEN};
pub use error::DigestError;
