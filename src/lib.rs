//! # bytelines
//!
//! Binary-safe primitives for consuming large line-oriented byte streams
//! without materializing intermediate text:
//! - `ByteBuffer`: growable byte sequence with deterministic growth
//! - `LineReader`: `\n` / `\r\n` / `\r` line splitting over a blocking source
//! - `ByteKeyedMap`: hash table keyed by raw bytes, copy-on-insert keys
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ByteSource (file, pipe, ...)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ bulk / single-byte reads
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      LineReader                              │
//! │              (ByteBuffer fill/scan window)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Vec<u8> lines
//!                       ▼
//!                ┌─────────────┐
//!                │ ByteKeyedMap│  (dedup / index by content)
//!                └─────────────┘
//! ```
//!
//! None of the types lock internally; each is meant for a single owner.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod buffer;
pub mod reader;
pub mod map;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ByteError, Result};
pub use config::Config;
pub use buffer::ByteBuffer;
pub use reader::{ByteSource, LineReader, ReadSource};
pub use map::ByteKeyedMap;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bytelines
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
