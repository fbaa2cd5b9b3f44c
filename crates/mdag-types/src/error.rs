use thiserror::Error;

/// Errors parsing a [`Digest`](crate::Digest) from text or bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("digest is not valid hex: {0}")]
    InvalidHex(String),

    #[error("digest must be {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}
