//! ByteKeyedMap implementation
//!
//! Fixed-count chained buckets with copy-on-insert keys.

use tracing::debug;

use crate::buffer::hash_bytes;
use crate::config::{Config, DEFAULT_BUCKET_COUNT};
use crate::error::{ByteError, Result};

/// A stored key/value pair; the key is the map's own copy
#[derive(Debug, Clone)]
struct Entry<V> {
    key: Box<[u8]>,
    value: V,
}

/// Hash map from byte sequences to `V`
#[derive(Debug, Clone)]
pub struct ByteKeyedMap<V> {
    /// Bucket chains; an empty chain holds no allocation
    buckets: Vec<Vec<Entry<V>>>,
    /// Total entries across all chains
    len: usize,
}

impl<V> ByteKeyedMap<V> {
    /// Create an empty map with the default 100 buckets
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Create an empty map with `bucket_count` buckets
    pub fn with_bucket_count(bucket_count: usize) -> Result<Self> {
        if bucket_count == 0 {
            return Err(ByteError::Config(
                "bucket_count must be greater than zero".to_string(),
            ));
        }
        Ok(Self::with_buckets(bucket_count))
    }

    /// Create an empty map sized by `config`
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_buckets(config.bucket_count))
    }

    fn with_buckets(bucket_count: usize) -> Self {
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        Self { buckets, len: 0 }
    }

    /// Bucket a key falls into
    fn bucket(&self, key: &[u8]) -> usize {
        let count = self.buckets.len() as i64;
        (hash_bytes(key) as i64).rem_euclid(count) as usize
    }

    fn position(&self, bucket: usize, key: &[u8]) -> Option<usize> {
        self.buckets[bucket].iter().position(|e| &*e.key == key)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Store `value` under `key`.
    ///
    /// An existing entry with equal key bytes has its value replaced in
    /// place; otherwise a new entry holding a copy of `key` is appended to
    /// the bucket chain. Returns the stored value.
    pub fn put(&mut self, key: &[u8], value: V) -> &mut V {
        let bucket = self.bucket(key);
        match self.position(bucket, key) {
            Some(idx) => {
                let entry = &mut self.buckets[bucket][idx];
                entry.value = value;
                &mut entry.value
            }
            None => self.insert_new(bucket, key, value),
        }
    }

    /// Value for `key`, inserting `default()` first if the key is absent
    pub fn get_or_insert_with<F>(&mut self, key: &[u8], default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let bucket = self.bucket(key);
        match self.position(bucket, key) {
            Some(idx) => &mut self.buckets[bucket][idx].value,
            None => self.insert_new(bucket, key, default()),
        }
    }

    fn insert_new(&mut self, bucket: usize, key: &[u8], value: V) -> &mut V {
        let chain = &mut self.buckets[bucket];
        chain.push(Entry {
            key: key.into(),
            value,
        });
        self.len += 1;
        let last = chain.len() - 1;
        &mut chain[last].value
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let bucket = self.bucket(key);
        self.position(bucket, key)
            .map(|idx| &self.buckets[bucket][idx].value)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let bucket = self.bucket(key);
        let idx = self.position(bucket, key)?;
        Some(&mut self.buckets[bucket][idx].value)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        let bucket = self.bucket(key);
        self.position(bucket, key).is_some()
    }

    /// Remove the entry for `key`, returning its value
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let bucket = self.bucket(key);
        let idx = self.position(bucket, key)?;
        let chain = &mut self.buckets[bucket];
        let entry = chain.remove(idx);
        if chain.is_empty() {
            // Release the chain's storage
            *chain = Vec::new();
        }
        self.len -= 1;
        Some(entry.value)
    }

    /// All values, bucket by bucket, insertion order within a bucket
    pub fn values(&self) -> Values<'_, V> {
        Values {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }

    /// Remove every entry; the bucket count is kept
    pub fn clear(&mut self) {
        debug!(entries = self.len, "clearing byte-keyed map");
        for chain in &mut self.buckets {
            *chain = Vec::new();
        }
        self.len = 0;
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl<V> Default for ByteKeyedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over map values, created by [`ByteKeyedMap::values`]
pub struct Values<'a, V> {
    buckets: std::slice::Iter<'a, Vec<Entry<V>>>,
    chain: std::slice::Iter<'a, Entry<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining -= 1;
                return Some(&entry.value);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
