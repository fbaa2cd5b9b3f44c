use mdag_types::Digest;

/// A resettable, reusable digest function.
///
/// Callers `reset` before each independent computation, feed bytes with
/// `write`, then read the digest with `sum`. `sum` does not consume or reset
/// the state. An instance is not meant to be shared across threads; give each
/// concurrent branch its own.
pub trait Hasher {
    /// Discard any absorbed input.
    fn reset(&mut self);

    /// Absorb `bytes`.
    fn write(&mut self, bytes: &[u8]);

    /// Digest of everything written since the last reset.
    fn sum(&self) -> Digest;

    /// Reset, absorb `bytes`, and return the digest.
    fn digest(&mut self, bytes: &[u8]) -> Digest {
        self.reset();
        self.write(bytes);
        self.sum()
    }
}

impl<H: Hasher + ?Sized> Hasher for &mut H {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }

    fn sum(&self) -> Digest {
        (**self).sum()
    }
}

/// BLAKE3 hasher, optionally domain-separated.
///
/// With a domain tag (e.g. `"mdag-object-v1"`), the tag and a `:` separator
/// are absorbed after every reset, so two deployments using different tags
/// never share digests for the same bytes.
#[derive(Clone)]
pub struct Blake3Hasher {
    inner: blake3::Hasher,
    domain: Option<&'static str>,
}

impl Blake3Hasher {
    /// Plain BLAKE3 with no domain prefix.
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
            domain: None,
        }
    }

    /// BLAKE3 with `domain` absorbed at the start of every computation.
    pub fn with_domain(domain: &'static str) -> Self {
        let mut hasher = Self {
            inner: blake3::Hasher::new(),
            domain: Some(domain),
        };
        hasher.reset();
        hasher
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Blake3Hasher {
    fn reset(&mut self) {
        self.inner.reset();
        if let Some(domain) = self.domain {
            self.inner.update(domain.as_bytes());
            self.inner.update(b":");
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn sum(&self) -> Digest {
        Digest::new(*self.inner.finalize().as_bytes())
    }
}

impl std::fmt::Debug for Blake3Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake3Hasher")
            .field("domain", &self.domain)
            .finish()
    }
}
