//! Map Module
//!
//! Hash table keyed directly by raw byte sequences.
//!
//! ## Responsibilities
//! - Look up values by byte-exact key content
//! - Own a private copy of every inserted key
//! - Keep an exact entry count
//!
//! ## Data Structure Choice
//! A fixed number of buckets (default 100), each a chain of entries kept in
//! insertion order:
//! - Bucket index = polynomial hash of the key, modulo bucket count,
//!   corrected to be non-negative
//! - No rehashing: chains grow under load and lookups degrade towards a
//!   linear scan, but `values()` order stays stable
//!
//! Only the operations below are offered; there is no key or entry view.

mod table;

pub use table::{ByteKeyedMap, Values};
