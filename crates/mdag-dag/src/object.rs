//! The persisted graph: objects and the links between them.
//!
//! An [`Object`] plays one of three roles, recorded in its [`ObjectKind`]:
//!
//! - **Blob**: a leaf holding raw chunk bytes in `data`, with no links.
//! - **List**: an indirect object for a file larger than one chunk. Its links
//!   point at blobs or further lists in ascending byte-offset order.
//! - **Tree**: a directory. Its links point at blobs, lists, or trees in the
//!   directory's iteration order.
//!
//! Every link carries its own [`LinkKind`] tag, so the tag sequence of an
//! object is aligned 1:1 with its links by construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use mdag_types::Digest;

/// Role of an object in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Leaf holding raw bytes.
    Blob,
    /// Indirect list over chunks of one file.
    List,
    /// Directory listing.
    Tree,
}

impl ObjectKind {
    /// The tag a parent records when linking to an object of this kind.
    pub fn link_kind(self) -> LinkKind {
        match self {
            Self::Blob => LinkKind::Blob,
            Self::List => LinkKind::List,
            Self::Tree => LinkKind::Tree,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::List => write!(f, "list"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

/// Type tag of a link target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// The target is a leaf blob.
    Blob,
    /// The target is an indirect list.
    List,
    /// The target is a directory tree.
    Tree,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::List => write!(f, "list"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

/// A reference from one object to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Entry name inside a tree. Empty for chunk links inside a list.
    pub name: String,
    /// Digest of the target's canonical encoding.
    pub hash: Digest,
    /// Content bytes spanned by the target. For directory entries this is
    /// the node's self-reported size.
    pub size: u64,
    /// Kind of the target.
    pub kind: LinkKind,
}

impl Link {
    /// Create a new link.
    pub fn new(name: impl Into<String>, hash: Digest, size: u64, kind: LinkKind) -> Self {
        Self {
            name: name.into(),
            hash,
            size,
            kind,
        }
    }

    /// An unnamed link to a chunk subtree of a file.
    pub fn chunk(hash: Digest, size: u64, kind: LinkKind) -> Self {
        Self::new(String::new(), hash, size, kind)
    }
}

/// A node of the persisted graph.
///
/// Field order is part of the canonical encoding; see [`crate::codec`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Role of this object.
    pub kind: ObjectKind,
    /// Outgoing links, in order.
    pub links: Vec<Link>,
    /// Raw bytes for a blob; empty for lists and trees.
    pub data: Vec<u8>,
}

impl Object {
    /// A leaf blob over `data`.
    pub fn blob(data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: ObjectKind::Blob,
            links: Vec::new(),
            data: data.into(),
        }
    }

    /// An empty indirect list.
    pub fn list() -> Self {
        Self {
            kind: ObjectKind::List,
            links: Vec::new(),
            data: Vec::new(),
        }
    }

    /// An empty directory tree.
    pub fn tree() -> Self {
        Self {
            kind: ObjectKind::Tree,
            links: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Append a link.
    pub fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Returns `true` if this object has no outgoing links.
    pub fn is_leaf(&self) -> bool {
        self.links.is_empty()
    }

    /// The tag sequence of this object's links.
    pub fn tags(&self) -> Vec<LinkKind> {
        self.links.iter().map(|l| l.kind).collect()
    }

    /// Sum of the sizes recorded in this object's links.
    pub fn linked_size(&self) -> u64 {
        self.links.iter().map(|l| l.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_has_data_and_no_links() {
        let obj = Object::blob(b"hello".to_vec());
        assert_eq!(obj.kind, ObjectKind::Blob);
        assert!(obj.is_leaf());
        assert_eq!(obj.data, b"hello");
    }

    #[test]
    fn tags_follow_links() {
        let mut tree = Object::tree();
        tree.push_link(Link::new("a", Digest::new([1; 32]), 3, LinkKind::Blob));
        tree.push_link(Link::new("b", Digest::new([2; 32]), 9, LinkKind::Tree));
        tree.push_link(Link::new("c", Digest::new([3; 32]), 5, LinkKind::List));
        assert_eq!(tree.tags(), vec![LinkKind::Blob, LinkKind::Tree, LinkKind::List]);
        assert_eq!(tree.linked_size(), 17);
        assert!(!tree.is_leaf());
        assert!(tree.data.is_empty());
    }

    #[test]
    fn chunk_links_are_unnamed() {
        let link = Link::chunk(Digest::new([4; 32]), 10, LinkKind::Blob);
        assert!(link.name.is_empty());
        assert_eq!(link.size, 10);
    }

    #[test]
    fn object_kind_maps_to_link_kind() {
        assert_eq!(ObjectKind::Blob.link_kind(), LinkKind::Blob);
        assert_eq!(ObjectKind::List.link_kind(), LinkKind::List);
        assert_eq!(ObjectKind::Tree.link_kind(), LinkKind::Tree);
    }

    #[test]
    fn kind_display() {
        assert_eq!(format!("{}", ObjectKind::List), "list");
        assert_eq!(format!("{}", LinkKind::Tree), "tree");
    }
}
