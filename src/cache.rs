//! Shared compiled-schema cache.
//!
//! Compiling a schema is by far the most expensive step of a matcher query,
//! so compiled validators are cached process-wide keyed by the schema node's
//! stable 64-bit hash. The cache handle is cheap to clone and is shared
//! through [`StrictOptions`](crate::StrictOptions); every clone sees the
//! same entries.
//!
//! Concurrent stores for the same key are resolved last-writer-wins, which
//! is safe because entries are computed deterministically from the key.

use std::collections::HashMap;
use std::sync::Arc;

use jsonschema::Validator;
use parking_lot::RwLock;
use serde_json::Value;

/// A cached compilation of one schema node.
pub struct CacheEntry {
    /// The schema exactly as the node carried it.
    pub source: Value,
    /// The self-contained document handed to the compiler, with the
    /// component schemas embedded so internal `$ref`s resolve.
    pub rendered: Value,
    /// The compiled validator.
    pub compiled: Arc<Validator>,
}

/// A thread-safe cache from schema hash to compiled schema.
///
/// # Thread Safety
///
/// The cache uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple validation calls can read concurrently
/// - Stores are serialized; the last writer for a key wins
///
/// # Example
///
/// ```rust
/// use stickler::SchemaCache;
///
/// let cache = SchemaCache::new();
/// let shared = cache.clone();
/// assert!(shared.load(42).is_none());
/// ```
#[derive(Clone, Default)]
pub struct SchemaCache {
    entries: Arc<RwLock<HashMap<u64, Arc<CacheEntry>>>>,
}

impl SchemaCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for a key, or None when nothing is cached.
    pub fn load(&self, key: u64) -> Option<Arc<CacheEntry>> {
        self.entries.read().get(&key).cloned()
    }

    /// Stores an entry, overwriting any previous entry for the key.
    pub fn store(&self, key: u64, entry: Arc<CacheEntry>) {
        self.entries.write().insert(key, entry);
    }

    /// Visits every cached entry.
    pub fn for_each(&self, mut f: impl FnMut(u64, &Arc<CacheEntry>)) {
        for (key, entry) in self.entries.read().iter() {
            f(*key, entry);
        }
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
