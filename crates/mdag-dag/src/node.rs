//! The input tree: files and directories as seen by the builder.
//!
//! A [`Node`] reports its [`NodeType`] explicitly and exposes the matching
//! capability through [`Node::as_file`] or [`Node::as_dir`]. The builder
//! dispatches on the reported type and never inspects concrete types.

use std::fmt;
use std::io;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Type discriminant reported by every node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Regular file with byte content.
    File,
    /// Directory with an ordered list of children.
    Dir,
    /// Symbolic link. Reported by adapters, never followed.
    Symlink,
    /// Anything else an adapter encounters (device, socket, fifo, ...).
    Other,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Dir => write!(f, "dir"),
            Self::Symlink => write!(f, "symlink"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Children of a directory, in the directory's deterministic order.
pub type Children<'a> = Box<dyn Iterator<Item = io::Result<Box<dyn Node + 'a>>> + 'a>;

/// An entry of the input tree.
pub trait Node {
    /// What kind of entry this is.
    fn node_type(&self) -> NodeType;

    /// Entry name, used as the link name in the parent tree.
    fn name(&self) -> &str;

    /// Self-reported size in bytes. Recorded verbatim in the parent's link.
    fn size(&self) -> u64;

    /// File capability, present when `node_type()` is [`NodeType::File`].
    fn as_file(&self) -> Option<&dyn FileNode> {
        None
    }

    /// Directory capability, present when `node_type()` is [`NodeType::Dir`].
    fn as_dir(&self) -> Option<&dyn DirNode> {
        None
    }
}

/// A regular file.
pub trait FileNode: Node {
    /// The full content.
    fn bytes(&self) -> io::Result<Bytes>;
}

/// A directory.
pub trait DirNode: Node {
    /// Iterate the children. The order must be identical on every call with
    /// the same content, since digests depend on it. A single pass is all the
    /// builder needs.
    fn children(&self) -> io::Result<Children<'_>>;
}

impl<T: Node + ?Sized> Node for &T {
    fn node_type(&self) -> NodeType {
        (**self).node_type()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn as_file(&self) -> Option<&dyn FileNode> {
        (**self).as_file()
    }

    fn as_dir(&self) -> Option<&dyn DirNode> {
        (**self).as_dir()
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn node_type(&self) -> NodeType {
        (**self).node_type()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn as_file(&self) -> Option<&dyn FileNode> {
        (**self).as_file()
    }

    fn as_dir(&self) -> Option<&dyn DirNode> {
        (**self).as_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fifo;

    impl Node for Fifo {
        fn node_type(&self) -> NodeType {
            NodeType::Other
        }

        fn name(&self) -> &str {
            "pipe"
        }

        fn size(&self) -> u64 {
            0
        }
    }

    #[test]
    fn node_type_display() {
        assert_eq!(NodeType::File.to_string(), "file");
        assert_eq!(NodeType::Dir.to_string(), "dir");
        assert_eq!(NodeType::Symlink.to_string(), "symlink");
        assert_eq!(NodeType::Other.to_string(), "other");
    }

    #[test]
    fn capabilities_default_to_none() {
        let node = Fifo;
        assert!(node.as_file().is_none());
        assert!(node.as_dir().is_none());
    }

    #[test]
    fn references_and_boxes_forward() {
        let boxed: Box<dyn Node> = Box::new(Fifo);
        let by_ref = &boxed;
        assert_eq!(by_ref.node_type(), NodeType::Other);
        assert_eq!(by_ref.name(), "pipe");
        assert_eq!(by_ref.size(), 0);
    }
}
