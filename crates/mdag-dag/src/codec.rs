//! Canonical encoding of [`Object`]s.
//!
//! Digests are computed over these bytes, so the layout is a stable on-disk
//! contract. It is `bincode` 1.x with default options over [`Object`]:
//!
//! ```text
//! kind   u32 LE variant index (0 blob, 1 list, 2 tree)
//! links  u64 LE count, then per link:
//!          name  u64 LE length + UTF-8 bytes
//!          hash  32 raw bytes
//!          size  u64 LE
//!          kind  u32 LE variant index (0 blob, 1 list, 2 tree)
//! data   u64 LE length + raw bytes
//! ```

use mdag_crypto::Hasher;
use mdag_types::Digest;

use crate::error::{DagError, DagResult};
use crate::object::Object;

/// Encode `object` canonically.
pub fn encode(object: &Object) -> DagResult<Vec<u8>> {
    bincode::serialize(object).map_err(|e| DagError::Serialization(e.to_string()))
}

/// Decode a canonical encoding. Used by tooling and tests; the builder never
/// reads objects back.
pub fn decode(bytes: &[u8]) -> DagResult<Object> {
    bincode::deserialize(bytes).map_err(|e| DagError::Serialization(e.to_string()))
}

/// Encode `object` and hash the encoding. Returns the digest and the bytes
/// to persist under it.
pub fn encode_and_hash<H: Hasher + ?Sized>(
    object: &Object,
    hasher: &mut H,
) -> DagResult<(Digest, Vec<u8>)> {
    let encoded = encode(object)?;
    let digest = hasher.digest(&encoded);
    Ok((digest, encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Link, LinkKind};
    use mdag_crypto::Blake3Hasher;

    #[test]
    fn blob_layout_is_pinned() {
        let encoded = encode(&Object::blob(b"hi".to_vec())).unwrap();
        let mut expected = vec![0, 0, 0, 0]; // kind = blob
        expected.extend_from_slice(&0u64.to_le_bytes()); // no links
        expected.extend_from_slice(&2u64.to_le_bytes());
        expected.extend_from_slice(b"hi");
        assert_eq!(encoded, expected);
    }

    #[test]
    fn tree_layout_is_pinned() {
        let mut tree = Object::tree();
        tree.push_link(Link::new("a", Digest::new([0xaa; 32]), 7, LinkKind::List));
        let encoded = encode(&tree).unwrap();

        let mut expected = vec![2, 0, 0, 0]; // kind = tree
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.push(b'a');
        expected.extend_from_slice(&[0xaa; 32]);
        expected.extend_from_slice(&7u64.to_le_bytes());
        expected.extend_from_slice(&[1, 0, 0, 0]); // link kind = list
        expected.extend_from_slice(&0u64.to_le_bytes()); // empty data
        assert_eq!(encoded, expected);
    }

    #[test]
    fn empty_blob_and_empty_tree_differ() {
        let blob = encode(&Object::blob(Vec::new())).unwrap();
        let tree = encode(&Object::tree()).unwrap();
        assert_ne!(blob, tree);
    }

    #[test]
    fn decode_inverts_encode() {
        let mut list = Object::list();
        list.push_link(Link::chunk(Digest::new([1; 32]), 4, LinkKind::Blob));
        list.push_link(Link::chunk(Digest::new([2; 32]), 1, LinkKind::Blob));
        let bytes = encode(&list).unwrap();
        assert_eq!(decode(&bytes).unwrap(), list);
    }

    #[test]
    fn decode_rejects_truncated_input() {
        let bytes = encode(&Object::blob(b"payload".to_vec())).unwrap();
        let err = decode(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, DagError::Serialization(_)));
    }

    #[test]
    fn encode_and_hash_digests_the_encoding() {
        let obj = Object::blob(b"content".to_vec());
        let mut hasher = Blake3Hasher::new();
        let (digest, bytes) = encode_and_hash(&obj, &mut hasher).unwrap();
        assert_eq!(bytes, encode(&obj).unwrap());
        assert_eq!(digest, Blake3Hasher::new().digest(&bytes));
    }
}
