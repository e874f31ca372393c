//! Reader Module
//!
//! Line-oriented reading over blocking byte sources without building
//! intermediate strings.
//!
//! ## Responsibilities
//! - Abstract the byte source (bulk read, single-byte read, close)
//! - Buffer and scan for `\n`, `\r\n` and bare `\r` terminators
//! - Return lines, fixed-size chunks and single bytes as raw bytes
//! - Release the source exactly once
//!
//! ## Window Layout
//! ```text
//! ┌──────────────────────────┬─────────────────────┐
//! │ buffered, unconsumed     │ spare (direct fill) │
//! └──────────────────────────┴─────────────────────┘
//! 0                          len                   capacity
//! ```
//! Every returned line removes `[0, line_end + terminator_len)` from the
//! front of the window.

mod line_reader;
mod source;

pub use line_reader::{LineReader, Lines};
pub use source::{ByteSource, ReadSource};
