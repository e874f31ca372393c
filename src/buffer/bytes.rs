//! Free helpers over raw byte slices
//!
//! Shared by `ByteBuffer` and `ByteKeyedMap` so a buffer and a plain slice
//! with the same content always hash and order the same way.

use std::cmp::Ordering;

/// Polynomial rolling hash `h = 31 * h + b` over the bytes.
///
/// Bytes are taken as signed values and the arithmetic wraps at 32 bits,
/// so the result matches hash codes produced by existing consumers of this
/// format (e.g. `hash_bytes(b"hello") == 99162322`).
pub fn hash_bytes(bytes: &[u8]) -> i32 {
    bytes
        .iter()
        .fold(0i32, |h, &b| h.wrapping_mul(31).wrapping_add(b as i8 as i32))
}

/// Length-first comparison of two byte slices.
///
/// A shorter slice always sorts first. Equal-length slices are compared
/// left to right with bytes taken as signed values, so `0x80` sorts
/// before `0x7f`.
pub fn compare_bytes(left: &[u8], right: &[u8]) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| {
        left.iter()
            .map(|&b| b as i8)
            .cmp(right.iter().map(|&b| b as i8))
    })
}

/// Whether the bytes spell exactly the given ASCII string.
///
/// Non-ASCII strings never match.
pub fn ascii_eq(bytes: &[u8], s: &str) -> bool {
    s.is_ascii() && bytes == s.as_bytes()
}
