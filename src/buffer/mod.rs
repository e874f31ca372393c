//! Buffer Module
//!
//! Growable, binary-safe byte sequences.
//!
//! ## Responsibilities
//! - Append bytes with deterministic capacity growth
//! - Index, search, slice, split and delete without text conversion
//! - Byte-exact equality, length-first ordering, polynomial hashing
//! - Direct fill of spare storage for readers (no intermediate copy)
//!
//! ## Growth Algorithm
//! ```text
//! next(L) = 2 * L        if L < 256
//!         = L + L / 2    otherwise
//! new capacity = max(next(L), minimum required), clamped to MAX_CAPACITY
//! ```
//! Starting from 4 and appending one byte at a time:
//! `4 → 8 → 16 → 32 → 64 → 128 → 256 → 384 → 576 → ...`

mod byte_buffer;
mod bytes;

pub use byte_buffer::{next_capacity, ByteBuffer, GROWTH_THRESHOLD, MAX_CAPACITY};
pub use bytes::{ascii_eq, compare_bytes, hash_bytes};
