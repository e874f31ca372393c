//! Error types for bytelines
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ByteError
pub type Result<T> = std::result::Result<T, ByteError>;

/// Unified error type for bytelines operations
#[derive(Debug, Error)]
pub enum ByteError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Bounds Errors
    // -------------------------------------------------------------------------
    #[error("Index {index} out of bounds for length {length}")]
    OutOfBounds { index: usize, length: usize },

    #[error("Cannot advance length to {requested}: capacity is {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    // -------------------------------------------------------------------------
    // Reader Errors
    // -------------------------------------------------------------------------
    #[error("Asked to read {expected} bytes, but source ended after {available}")]
    TruncatedRead { expected: usize, available: usize },

    #[error("Byte source already closed")]
    SourceClosed,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
