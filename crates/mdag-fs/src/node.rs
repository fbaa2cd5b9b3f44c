//! `Node` implementations over the local filesystem.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

use mdag_dag::{Children, DirNode, FileNode, Node, NodeType};

use crate::error::{FsError, FsResult};

/// A regular file. Content is read when the builder asks for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsFile {
    path: PathBuf,
    name: String,
    len: u64,
}

impl FsFile {
    /// Path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Node for FsFile {
    fn node_type(&self) -> NodeType {
        NodeType::File
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.len
    }

    fn as_file(&self) -> Option<&dyn FileNode> {
        Some(self)
    }
}

impl FileNode for FsFile {
    fn bytes(&self) -> io::Result<Bytes> {
        fs::read(&self.path).map(Bytes::from)
    }
}

/// A directory. Its size is the total length of the regular files beneath
/// it, so it depends only on content and not on the directory's history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsDir {
    path: PathBuf,
    name: String,
    len: u64,
}

impl FsDir {
    /// Path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Node for FsDir {
    fn node_type(&self) -> NodeType {
        NodeType::Dir
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.len
    }

    fn as_dir(&self) -> Option<&dyn DirNode> {
        Some(self)
    }
}

impl DirNode for FsDir {
    /// Immediate children in byte-wise file-name order. Symlinks are not
    /// followed.
    fn children(&self) -> io::Result<Children<'_>> {
        let entries = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry
                    .map_err(entry_error)
                    .and_then(|entry| FsNode::from_entry(&entry))
                    .map(|node| Box::new(node) as Box<dyn Node + '_>)
            });
        Ok(Box::new(entries))
    }
}

/// Any entry on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsNode {
    File(FsFile),
    Dir(FsDir),
    /// A symlink, socket, device, or fifo. The builder rejects these.
    Special {
        path: PathBuf,
        name: String,
        node_type: NodeType,
        len: u64,
    },
}

impl FsNode {
    /// Inspect `path` without following a final symlink.
    pub fn open(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        let metadata = fs::symlink_metadata(path).map_err(|source| FsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_str()
            .ok_or_else(|| FsError::InvalidName(path.to_path_buf()))?
            .to_string();

        let node = Self::from_parts(path.to_path_buf(), name, &metadata).map_err(|source| {
            FsError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        trace!(path = %path.display(), node_type = %node.node_type(), "opened");
        Ok(node)
    }

    /// Path on disk.
    pub fn path(&self) -> &Path {
        match self {
            Self::File(f) => f.path(),
            Self::Dir(d) => d.path(),
            Self::Special { path, .. } => path,
        }
    }

    fn from_entry(entry: &DirEntry) -> io::Result<Self> {
        let metadata = entry.metadata().map_err(entry_error)?;
        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file name is not valid UTF-8: {}", entry.path().display()),
                )
            })?
            .to_string();
        Self::from_parts(entry.path().to_path_buf(), name, &metadata)
    }

    fn from_parts(path: PathBuf, name: String, metadata: &Metadata) -> io::Result<Self> {
        let file_type = metadata.file_type();
        let len = metadata.len();
        let node = if file_type.is_file() {
            Self::File(FsFile { path, name, len })
        } else if file_type.is_dir() {
            let len = content_len(&path)?;
            Self::Dir(FsDir { path, name, len })
        } else {
            let node_type = if file_type.is_symlink() {
                NodeType::Symlink
            } else {
                NodeType::Other
            };
            Self::Special {
                path,
                name,
                node_type,
                len,
            }
        };
        Ok(node)
    }
}

/// Sum of the lengths of the regular files under `dir`, symlinks not followed.
fn content_len(dir: &Path) -> io::Result<u64> {
    let mut total = 0;
    for entry in WalkDir::new(dir).min_depth(1).follow_links(false) {
        let entry = entry.map_err(entry_error)?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(entry_error)?.len();
        }
    }
    Ok(total)
}

/// Convert a walk error, keeping the path of the entry that failed.
fn entry_error(err: walkdir::Error) -> io::Error {
    let kind = err.io_error().map_or(io::ErrorKind::Other, io::Error::kind);
    match err.path() {
        Some(path) => io::Error::new(kind, format!("{}: {err}", path.display())),
        None => io::Error::new(kind, err.to_string()),
    }
}

impl Node for FsNode {
    fn node_type(&self) -> NodeType {
        match self {
            Self::File(_) => NodeType::File,
            Self::Dir(_) => NodeType::Dir,
            Self::Special { node_type, .. } => *node_type,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Dir(d) => d.name(),
            Self::Special { name, .. } => name,
        }
    }

    fn size(&self) -> u64 {
        match self {
            Self::File(f) => f.size(),
            Self::Dir(d) => d.size(),
            Self::Special { len, .. } => *len,
        }
    }

    fn as_file(&self) -> Option<&dyn FileNode> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    fn as_dir(&self) -> Option<&dyn DirNode> {
        match self {
            Self::Dir(d) => Some(d),
            _ => None,
        }
    }
}
