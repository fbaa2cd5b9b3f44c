//! Hashing for mdag.
//!
//! The DAG builder never calls a hash function directly. It is handed a
//! [`Hasher`] and drives it through `reset` / `write` / `sum` for every object
//! it persists. [`Blake3Hasher`] is the implementation shipped with mdag.
//!
//! All crypto operations wrap established libraries. No custom cryptography.

pub mod hasher;

pub use hasher::{Blake3Hasher, Hasher};
