//! Filesystem-backed store.
//!
//! Layout mirrors a git loose-object directory:
//!
//! ```text
//! <root>/
//!   <first 2 hex chars>/
//!     <remaining 62 hex chars>
//! ```
//!
//! Each value is written to a temporary file in its fan-out directory and
//! renamed into place, so a reader never observes a partially written object.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use mdag_types::Digest;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// One file per object under a two-character fan-out directory.
#[derive(Clone, Debug)]
pub struct FsKvStore {
    root: PathBuf,
    read_only: bool,
}

impl FsKvStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            read_only: false,
        })
    }

    /// Open an existing store for inspection only. Every `put` fails with
    /// [`StoreError::ReadOnly`].
    pub fn open_read_only(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("store root {} does not exist", root.display()),
            )));
        }
        Ok(Self {
            root,
            read_only: true,
        })
    }

    /// The directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path at which `key`'s value lives.
    pub fn object_path(&self, key: &Digest) -> PathBuf {
        let (dir, file) = self.split_key(key);
        dir.join(file)
    }

    fn split_key(&self, key: &Digest) -> (PathBuf, String) {
        let hex = key.to_hex();
        (self.root.join(&hex[..2]), hex[2..].to_string())
    }

    /// Returns `true` if `key` has been written.
    pub fn contains(&self, key: &Digest) -> bool {
        self.object_path(key).is_file()
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &Digest) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.object_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl KvStore for FsKvStore {
    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        if key.is_null() {
            return Err(StoreError::NullKey);
        }

        let (dir, file) = self.split_key(key);
        let path = dir.join(file);
        if path.is_file() {
            trace!(key = %key.short_hex(), "object already present");
            return Ok(());
        }
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(value)?;
        tmp.as_file().sync_all()?;
        if let Err(e) = tmp.persist(&path) {
            // A concurrent writer may have won the rename with the same bytes.
            if path.is_file() {
                return Ok(());
            }
            return Err(StoreError::Io(e.error));
        }

        trace!(key = %key.short_hex(), len = value.len(), "object written");
        Ok(())
    }
}
