//! Owned in-memory nodes, for embedding and tests.

use std::io;

use bytes::Bytes;

use crate::node::{Children, DirNode, FileNode, Node, NodeType};

/// A file held entirely in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemFile {
    name: String,
    content: Bytes,
}

impl MemFile {
    /// Create a file named `name` holding `content`.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl Node for MemFile {
    fn node_type(&self) -> NodeType {
        NodeType::File
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.content.len() as u64
    }

    fn as_file(&self) -> Option<&dyn FileNode> {
        Some(self)
    }
}

impl FileNode for MemFile {
    fn bytes(&self) -> io::Result<Bytes> {
        Ok(self.content.clone())
    }
}

/// A directory held in memory. Children keep insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemDir {
    name: String,
    entries: Vec<MemNode>,
    reported_size: Option<u64>,
}

impl MemDir {
    /// Create an empty directory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            reported_size: None,
        }
    }

    /// Append a child, builder style.
    pub fn with(mut self, child: impl Into<MemNode>) -> Self {
        self.push(child);
        self
    }

    /// Report `size` instead of the sum of the children's sizes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.reported_size = Some(size);
        self
    }

    /// Append a child.
    pub fn push(&mut self, child: impl Into<MemNode>) {
        self.entries.push(child.into());
    }
}

impl Node for MemDir {
    fn node_type(&self) -> NodeType {
        NodeType::Dir
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.reported_size
            .unwrap_or_else(|| self.entries.iter().map(|e| e.size()).sum())
    }

    fn as_dir(&self) -> Option<&dyn DirNode> {
        Some(self)
    }
}

impl DirNode for MemDir {
    fn children(&self) -> io::Result<Children<'_>> {
        Ok(Box::new(
            self.entries
                .iter()
                .map(|entry| Ok::<_, io::Error>(Box::new(entry) as Box<dyn Node + '_>)),
        ))
    }
}

/// Either kind of in-memory node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemNode {
    File(MemFile),
    Dir(MemDir),
}

impl From<MemFile> for MemNode {
    fn from(file: MemFile) -> Self {
        Self::File(file)
    }
}

impl From<MemDir> for MemNode {
    fn from(dir: MemDir) -> Self {
        Self::Dir(dir)
    }
}

impl Node for MemNode {
    fn node_type(&self) -> NodeType {
        match self {
            Self::File(_) => NodeType::File,
            Self::Dir(_) => NodeType::Dir,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Dir(d) => d.name(),
        }
    }

    fn size(&self) -> u64 {
        match self {
            Self::File(f) => f.size(),
            Self::Dir(d) => d.size(),
        }
    }

    fn as_file(&self) -> Option<&dyn FileNode> {
        match self {
            Self::File(f) => Some(f),
            Self::Dir(_) => None,
        }
    }

    fn as_dir(&self) -> Option<&dyn DirNode> {
        match self {
            Self::File(_) => None,
            Self::Dir(d) => Some(d),
        }
    }
}
