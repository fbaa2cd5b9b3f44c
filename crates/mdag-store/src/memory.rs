use std::collections::HashMap;
use std::sync::RwLock;

use mdag_types::Digest;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// In-memory, HashMap-based store.
///
/// Intended for tests and embedding. All values are held in memory behind a
/// `RwLock` for safe concurrent access. Values are copied on put and cloned on
/// read.
pub struct InMemoryKvStore {
    objects: RwLock<HashMap<Digest, Vec<u8>>>,
}

impl InMemoryKvStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &Digest) -> Option<Vec<u8>> {
        self.objects.read().expect("lock poisoned").get(key).cloned()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &Digest) -> bool {
        self.objects.read().expect("lock poisoned").contains_key(key)
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Return a sorted list of all keys in the store.
    pub fn keys(&self) -> Vec<Digest> {
        let map = self.objects.read().expect("lock poisoned");
        let mut keys: Vec<Digest> = map.keys().copied().collect();
        keys.sort();
        keys
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for InMemoryKvStore {
    fn put(&self, key: &Digest, value: &[u8]) -> StoreResult<()> {
        if key.is_null() {
            return Err(StoreError::NullKey);
        }
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: the same key always maps to the same content.
        map.entry(*key).or_insert_with(|| value.to_vec());
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryKvStore")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdag_crypto::{Blake3Hasher, Hasher};

    fn keyed(value: &[u8]) -> (Digest, Vec<u8>) {
        (Blake3Hasher::new().digest(value), value.to_vec())
    }

    #[test]
    fn put_and_get() {
        let store = InMemoryKvStore::new();
        let (key, value) = keyed(b"hello world");
        store.put(&key, &value).unwrap();
        assert_eq!(store.get(&key).as_deref(), Some(&b"hello world"[..]));
        assert!(store.contains(&key));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryKvStore::new();
        let (key, _) = keyed(b"missing");
        assert!(store.get(&key).is_none());
        assert!(!store.contains(&key));
    }

    #[test]
    fn put_is_idempotent() {
        let store = InMemoryKvStore::new();
        let (key, value) = keyed(b"idempotent");
        store.put(&key, &value).unwrap();
        store.put(&key, &value).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn null_key_rejected() {
        let store = InMemoryKvStore::new();
        let err = store.put(&Digest::null(), b"x").unwrap_err();
        assert!(matches!(err, StoreError::NullKey));
        assert!(store.is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let store = InMemoryKvStore::new();
        for v in [b"aaa", b"bbb", b"ccc"] {
            let (k, v) = keyed(v);
            store.put(&k, &v).unwrap();
        }
        let keys = store.keys();
        assert_eq!(keys.len(), 3);
        for w in keys.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn concurrent_puts_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryKvStore::new());
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let shared = keyed(b"shared");
                    store.put(&shared.0, &shared.1).unwrap();
                    let own = keyed(&[i; 16]);
                    store.put(&own.0, &own.1).unwrap();
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
        assert_eq!(store.len(), 9);
    }

    #[test]
    fn usable_through_reference_and_arc() {
        fn write_via<S: KvStore>(s: S, key: &Digest) {
            s.put(key, b"v").unwrap();
        }
        let store = InMemoryKvStore::new();
        let (key, _) = keyed(b"v");
        write_via(&store, &key);
        let shared = std::sync::Arc::new(InMemoryKvStore::new());
        write_via(shared.clone(), &key);
        assert!(store.contains(&key));
        assert!(shared.contains(&key));
    }

    #[test]
    fn debug_format() {
        let store = InMemoryKvStore::new();
        let (k, v) = keyed(b"x");
        store.put(&k, &v).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryKvStore"));
        assert!(debug.contains("object_count"));
    }
}
