//! ByteBuffer implementation
//!
//! A `Vec<u8>`-backed byte sequence whose storage is always fully
//! allocated: `storage.len()` is the capacity, `len` is the logical length.
//! Bytes in `[len, capacity)` are scratch space and carry no meaning.

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::config::{Config, DEFAULT_BUFFER_CAPACITY};
use crate::error::{ByteError, Result};

use super::bytes::{ascii_eq, compare_bytes, hash_bytes};

/// Capacities below this double on growth; at or above it they grow by half
pub const GROWTH_THRESHOLD: usize = 256;

/// Largest capacity a buffer will ever request
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// Next capacity for storage of the given size, before applying any
/// caller-supplied minimum.
pub fn next_capacity(current: usize) -> usize {
    if current < GROWTH_THRESHOLD {
        current.saturating_mul(2)
    } else {
        current.saturating_add(current / 2)
    }
}

/// Growable, binary-safe sequence of bytes
pub struct ByteBuffer {
    /// Backing storage; its length is the capacity
    storage: Vec<u8>,
    /// Logical content length (`len <= storage.len()`)
    len: usize,
    /// Cached polynomial hash of the content, cleared on every mutation
    hash: Cell<Option<i32>>,
}

impl ByteBuffer {
    /// Create an empty buffer with the default capacity (256 bytes)
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create an empty buffer sized by `config.buffer_capacity`
    pub fn with_config(config: &Config) -> Self {
        Self::with_capacity(config.buffer_capacity)
    }

    /// Create an empty buffer with exactly `capacity` bytes of storage
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            len: 0,
            hash: Cell::new(None),
        }
    }

    /// Create a buffer holding a copy of `bytes`.
    ///
    /// Capacity is `max(bytes.len(), 256)`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut storage = vec![0; bytes.len().max(DEFAULT_BUFFER_CAPACITY)];
        storage[..bytes.len()].copy_from_slice(bytes);
        Self {
            storage,
            len: bytes.len(),
            hash: Cell::new(None),
        }
    }

    // =========================================================================
    // Size Queries
    // =========================================================================

    /// Logical content length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Storage size in bytes
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes that can be appended before storage has to grow
    pub fn space(&self) -> usize {
        self.storage.len() - self.len
    }

    /// Whether any spare capacity remains
    pub fn has_remaining(&self) -> bool {
        self.len < self.storage.len()
    }

    // =========================================================================
    // Content Access
    // =========================================================================

    /// Borrow the content `[0, len)`
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Owned copy of the content
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Read the byte at `index`.
    ///
    /// `index == len` is tolerated and reads the slot just past the content
    /// (meaningful only after a `set_byte_at` there); anything further, or
    /// a slot beyond the storage, is out of bounds.
    pub fn byte_at(&self, index: usize) -> Result<u8> {
        self.check_slot(index)?;
        Ok(self.storage[index])
    }

    /// Overwrite the byte at `index`, with the same bounds as `byte_at`
    pub fn set_byte_at(&mut self, index: usize, byte: u8) -> Result<()> {
        self.check_slot(index)?;
        self.storage[index] = byte;
        self.hash.set(None);
        Ok(())
    }

    fn check_slot(&self, index: usize) -> Result<()> {
        if index > self.len || index >= self.storage.len() {
            return Err(ByteError::OutOfBounds {
                index,
                length: self.len,
            });
        }
        Ok(())
    }

    /// Index of the first occurrence of `byte`
    pub fn index_of(&self, byte: u8) -> Option<usize> {
        self.index_of_from(byte, 0)
    }

    /// Index of the first occurrence of `byte` at or after `start`
    pub fn index_of_from(&self, byte: u8, start: usize) -> Option<usize> {
        if start >= self.len {
            return None;
        }
        self.storage[start..self.len]
            .iter()
            .position(|&b| b == byte)
            .map(|offset| start + offset)
    }

    /// Split the content around every occurrence of `delim`.
    ///
    /// Consecutive delimiters yield empty fields; a trailing delimiter
    /// does not produce a final empty field.
    pub fn split(&self, delim: u8) -> Vec<Vec<u8>> {
        let mut fields = Vec::new();
        let mut offset = 0;
        while let Some(idx) = self.index_of_from(delim, offset) {
            fields.push(self.storage[offset..idx].to_vec());
            offset = idx + 1;
        }
        if offset < self.len {
            fields.push(self.storage[offset..self.len].to_vec());
        }
        fields
    }

    /// Copy of the range `[from, to)`
    pub fn sub_sequence(&self, from: usize, to: usize) -> Result<Vec<u8>> {
        if from > self.len {
            return Err(ByteError::OutOfBounds {
                index: from,
                length: self.len,
            });
        }
        if to > self.len || from > to {
            return Err(ByteError::OutOfBounds {
                index: to,
                length: self.len,
            });
        }
        Ok(self.storage[from..to].to_vec())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append a single byte
    pub fn append(&mut self, byte: u8) -> &mut Self {
        if self.len >= self.storage.len() {
            self.grow(self.len + 1);
        }
        self.storage[self.len] = byte;
        self.len += 1;
        self.hash.set(None);
        self
    }

    /// Append every byte of `bytes`
    pub fn append_slice(&mut self, bytes: &[u8]) -> &mut Self {
        let end = self.len + bytes.len();
        if end > self.storage.len() {
            self.grow(end);
        }
        self.storage[self.len..end].copy_from_slice(bytes);
        self.len = end;
        self.hash.set(None);
        self
    }

    /// Append the first `count` bytes of `bytes`
    pub fn append_prefix(&mut self, bytes: &[u8], count: usize) -> Result<&mut Self> {
        if count > bytes.len() {
            return Err(ByteError::OutOfBounds {
                index: count,
                length: bytes.len(),
            });
        }
        Ok(self.append_slice(&bytes[..count]))
    }

    /// Remove `count` bytes starting at `index`, shifting the tail left.
    ///
    /// No-op when `index >= len`; truncates at `index` when the range runs
    /// past the end.
    pub fn delete(&mut self, index: usize, count: usize) -> &mut Self {
        if index >= self.len {
            return self;
        }
        let end = index.saturating_add(count);
        if end >= self.len {
            self.len = index;
        } else {
            self.storage.copy_within(end..self.len, index);
            self.len -= count;
        }
        self.hash.set(None);
        self
    }

    /// Drop everything at and beyond `index`
    pub fn truncate(&mut self, index: usize) -> &mut Self {
        if index < self.len {
            self.len = index;
            self.hash.set(None);
        }
        self
    }

    /// Reset the length to zero; storage is kept
    pub fn clear(&mut self) {
        self.len = 0;
        self.hash.set(None);
    }

    /// Replace the content with a copy of `bytes`, reusing storage when it
    /// is large enough
    pub fn reset(&mut self, bytes: &[u8]) {
        if bytes.len() <= self.storage.len() {
            self.storage[..bytes.len()].copy_from_slice(bytes);
        } else {
            self.storage = bytes.to_vec();
        }
        self.len = bytes.len();
        self.hash.set(None);
    }

    /// Grow storage so that at least `additional` more bytes fit
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len.saturating_add(additional);
        if required > self.storage.len() {
            self.grow(required);
        }
    }

    fn grow(&mut self, minimum: usize) {
        let old = self.storage.len();
        let new_capacity = next_capacity(old).max(minimum).min(MAX_CAPACITY);
        trace!(from = old, to = new_capacity, "growing byte buffer");
        self.storage.resize(new_capacity, 0);
    }

    // =========================================================================
    // Direct Fill
    // =========================================================================

    /// Spare storage `[len, capacity)` for filling in place.
    ///
    /// After writing `n` bytes at the front of this slice, call
    /// [`advance`](Self::advance) with `n` to make them content.
    pub fn spare_capacity_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.len..]
    }

    /// Extend the logical length over bytes written through
    /// [`spare_capacity_mut`](Self::spare_capacity_mut)
    pub fn advance(&mut self, count: usize) -> Result<()> {
        let requested = self.len.saturating_add(count);
        if requested > self.storage.len() {
            return Err(ByteError::CapacityExceeded {
                requested,
                capacity: self.storage.len(),
            });
        }
        self.len = requested;
        self.hash.set(None);
        Ok(())
    }

    // =========================================================================
    // Comparison & Hashing
    // =========================================================================

    /// Byte-exact comparison against a slice
    pub fn eq_bytes(&self, bytes: &[u8]) -> bool {
        self.as_slice() == bytes
    }

    /// Whether the content spells exactly the given ASCII string
    pub fn ascii_eq(&self, s: &str) -> bool {
        ascii_eq(self.as_slice(), s)
    }

    /// Length-first ordering against a slice
    pub fn compare_bytes(&self, bytes: &[u8]) -> Ordering {
        compare_bytes(self.as_slice(), bytes)
    }

    /// Polynomial hash of the content, computed once per content state
    pub fn hash_code(&self) -> i32 {
        if let Some(h) = self.hash.get() {
            return h;
        }
        let h = hash_bytes(self.as_slice());
        self.hash.set(Some(h));
        h
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ByteBuffer {
    /// The copy's capacity equals the source's length
    fn clone(&self) -> Self {
        Self {
            storage: self.to_vec(),
            len: self.len,
            hash: Cell::new(self.hash.get()),
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteBuffer {}

impl PartialEq<[u8]> for ByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for ByteBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl Ord for ByteBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_bytes(self.as_slice(), other.as_slice())
    }
}

impl PartialOrd for ByteBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for ByteBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_slice()))
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("len", &self.len)
            .field("capacity", &self.storage.len())
            .field("content", &String::from_utf8_lossy(self.as_slice()))
            .finish()
    }
}
