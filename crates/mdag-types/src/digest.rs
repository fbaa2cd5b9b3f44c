use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DigestError;

/// Length in bytes of every [`Digest`].
pub const DIGEST_LEN: usize = 32;

/// Content address of a stored object.
///
/// A `Digest` is the hash of an object's canonical encoding. Objects whose
/// encodings are byte-identical share a digest, so the store holds them once.
/// The type is opaque: it does not know which hash function produced it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap a pre-computed hash.
    pub const fn new(hash: [u8; DIGEST_LEN]) -> Self {
        Self(hash)
    }

    /// The null digest (all zeros). Never produced by a real hash in practice;
    /// stores reject it as a key.
    pub const fn null() -> Self {
        Self([0u8; DIGEST_LEN])
    }

    /// Returns `true` if this is the null digest.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; DIGEST_LEN]
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, DigestError> {
        let bytes = hex::decode(s).map_err(|e| DigestError::InvalidHex(e.to_string()))?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = DigestError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| DigestError::WrongLength {
            expected: DIGEST_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn null_is_all_zeros() {
        let null = Digest::null();
        assert!(null.is_null());
        assert_eq!(null.as_bytes(), &[0u8; DIGEST_LEN]);
        assert!(!Digest::new([1; DIGEST_LEN]).is_null());
    }

    #[test]
    fn short_hex_is_8_chars() {
        let d = Digest::new([0xab; DIGEST_LEN]);
        assert_eq!(d.short_hex(), "abababab");
    }

    #[test]
    fn display_is_full_hex() {
        let d = Digest::new([0x0f; DIGEST_LEN]);
        let display = format!("{d}");
        assert_eq!(display.len(), 64);
        assert_eq!(display, d.to_hex());
    }

    #[test]
    fn debug_uses_short_hex() {
        let d = Digest::new([0x12; DIGEST_LEN]);
        assert_eq!(format!("{d:?}"), "Digest(12121212)");
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            Digest::from_hex("zz"),
            Err(DigestError::InvalidHex(_))
        ));
        assert_eq!(
            Digest::from_hex("abcd"),
            Err(DigestError::WrongLength {
                expected: 32,
                actual: 2
            })
        );
    }

    #[test]
    fn try_from_slice_checks_length() {
        assert!(Digest::try_from(&[0u8; 31][..]).is_err());
        let d = Digest::try_from(&[7u8; 32][..]).unwrap();
        assert_eq!(d, Digest::new([7; 32]));
    }

    #[test]
    fn bincode_encodes_raw_bytes_without_length_prefix() {
        let d = Digest::new([9; DIGEST_LEN]);
        let encoded = bincode::serialize(&d).unwrap();
        assert_eq!(encoded, vec![9u8; DIGEST_LEN]);
    }

    #[test]
    fn serde_json_roundtrip() {
        let d = Digest::new([3; DIGEST_LEN]);
        let json = serde_json::to_string(&d).unwrap();
        let parsed: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn ordering_is_bytewise() {
        assert!(Digest::new([0; 32]) < Digest::new([1; 32]));
    }

    proptest! {
        #[test]
        fn hex_roundtrip(bytes in proptest::array::uniform32(any::<u8>())) {
            let d = Digest::new(bytes);
            prop_assert_eq!(Digest::from_hex(&d.to_hex()).unwrap(), d);
        }
    }
}
