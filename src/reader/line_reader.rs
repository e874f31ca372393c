//! LineReader implementation
//!
//! Streams bytes from a `ByteSource` through one `ByteBuffer` window and
//! hands back lines as `Vec<u8>` without ever building a `String`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::buffer::ByteBuffer;
use crate::config::Config;
use crate::error::{ByteError, Result};

use super::source::{ByteSource, ReadSource};

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// Reads lines, fixed-size chunks and single bytes from a blocking source
pub struct LineReader<S: ByteSource> {
    /// The source being consumed
    source: S,
    /// Fill/scan window; unconsumed bytes always start at index 0
    window: ByteBuffer,
    /// Landing area for incremental reads that are appended to the window
    scratch: Vec<u8>,
    lines_read: u64,
    bytes_read: u64,
    /// Last line ended on a \r that was the final buffered byte
    pending_cr: bool,
    closed: bool,
}

impl<S: ByteSource> LineReader<S> {
    /// Create a reader with the default window and scratch sizes
    pub fn new(source: S) -> Self {
        Self::build(source, &Config::default())
    }

    /// Create a reader sized by `config`
    pub fn with_config(source: S, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    fn build(source: S, config: &Config) -> Self {
        Self {
            source,
            window: ByteBuffer::with_capacity(config.window_capacity),
            scratch: vec![0; config.scratch_size],
            lines_read: 0,
            bytes_read: 0,
            pending_cr: false,
            closed: false,
        }
    }

    // =========================================================================
    // Line Reading
    // =========================================================================

    /// Read the next line.
    ///
    /// With `include_terminator == false` the terminator is stripped. With
    /// `true` it is normalized to a single `\n`, and one is added to a final
    /// unterminated line. Returns `Ok(None)` once the source is exhausted.
    pub fn read_line(&mut self, include_terminator: bool) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;

        // Top up a partially filled window before scanning
        if !self.window.is_empty() && self.window.has_remaining() {
            self.fill()?;
        }

        // The previous line ended on a bare \r with nothing after it; a
        // leading \n completes that \r\n and belongs to no line
        if self.pending_cr {
            if self.window.is_empty() {
                self.pull(self.scratch.len())?;
            }
            self.pending_cr = false;
            if !self.window.is_empty() && self.window.byte_at(0)? == LF {
                self.window.delete(0, 1);
                self.bytes_read += 1;
            }
        }

        let mut scan_from = 0;
        let mut trailing_cr = false;
        let (line_end, terminator_len) = loop {
            if let Some(n) = self.window.index_of_from(LF, scan_from) {
                if n > 0 && self.window.byte_at(n - 1)? == CR {
                    break (n - 1, 2);
                }
                break (n, 1);
            }

            if let Some(r) = self.window.index_of_from(CR, scan_from) {
                trailing_cr = r + 1 == self.window.len();
                break (r, 1);
            }

            scan_from = self.window.len();
            if self.pull(self.scratch.len())? == 0 {
                if self.window.is_empty() {
                    debug!(lines = self.lines_read, "end of source");
                    return Ok(None);
                }
                break (self.window.len(), 0);
            }
        };

        let mut line = self.window.sub_sequence(0, line_end)?;
        if include_terminator {
            line.push(LF);
        }

        let consumed = line_end + terminator_len;
        self.window.delete(0, consumed);
        self.pending_cr = trailing_cr;
        self.lines_read += 1;
        self.bytes_read += consumed as u64;

        Ok(Some(line))
    }

    /// Iterate over the remaining lines, terminators stripped
    pub fn lines(&mut self) -> Lines<'_, S> {
        Lines {
            reader: self,
            done: false,
        }
    }

    // =========================================================================
    // Fixed-size Reading
    // =========================================================================

    /// Read exactly `count` bytes, blocking until they are available.
    ///
    /// Fails with `TruncatedRead` if the source ends first; the bytes that
    /// did arrive stay buffered.
    pub fn read(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure_open()?;
        self.pending_cr = false;

        while self.window.len() < count {
            let missing = count - self.window.len();
            if self.pull(missing)? == 0 {
                return Err(ByteError::TruncatedRead {
                    expected: count,
                    available: self.window.len(),
                });
            }
        }

        let bytes = self.window.sub_sequence(0, count)?;
        self.window.delete(0, count);
        self.bytes_read += count as u64;
        Ok(bytes)
    }

    /// Read the next byte, from the window if anything is buffered,
    /// otherwise straight from the source
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        self.ensure_open()?;
        self.pending_cr = false;

        let byte = if self.window.is_empty() {
            self.source.read_byte()?
        } else {
            let b = self.window.byte_at(0)?;
            self.window.delete(0, 1);
            Some(b)
        };

        if byte.is_some() {
            self.bytes_read += 1;
        }
        Ok(byte)
    }

    // =========================================================================
    // Source Access
    // =========================================================================

    /// One direct read into the window's spare storage
    fn fill(&mut self) -> Result<usize> {
        let spare = self.window.spare_capacity_mut();
        if spare.is_empty() {
            return Ok(0);
        }
        let got = self.source.read_into(spare)?;
        self.window.advance(got)?;
        trace!(got, buffered = self.window.len(), "filled window");
        Ok(got)
    }

    /// Read up to `limit` bytes through the scratch array and append them.
    /// Returns 0 once the source has ended.
    fn pull(&mut self, limit: usize) -> Result<usize> {
        let want = limit.min(self.scratch.len());
        let got = self.source.read_into(&mut self.scratch[..want])?;
        if got > 0 {
            self.window.append_slice(&self.scratch[..got]);
        }
        trace!(want, got, buffered = self.window.len(), "pulled from source");
        Ok(got)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(ByteError::SourceClosed);
        }
        Ok(())
    }

    /// Release the source. Calling this more than once is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!(
            lines = self.lines_read,
            bytes = self.bytes_read,
            "closing line reader"
        );
        self.source.close()?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The underlying source
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    // =========================================================================
    // Counters
    // =========================================================================

    /// Lines returned so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Bytes consumed so far, terminators included
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Bytes read from the source but not yet consumed
    pub fn buffered(&self) -> usize {
        self.window.len()
    }
}

impl<R: Read> LineReader<ReadSource<R>> {
    /// Create a reader over any [`Read`]
    pub fn from_read(reader: R) -> Self {
        Self::new(ReadSource::new(reader))
    }
}

impl LineReader<ReadSource<BufReader<File>>> {
    /// Open a file for buffered line reading
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened file for line reading");
        Ok(Self::from_read(BufReader::new(file)))
    }
}

impl<S: ByteSource> Drop for LineReader<S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to close byte source");
        }
    }
}

/// Iterator over lines, created by [`LineReader::lines`].
///
/// Ends after the first error.
pub struct Lines<'a, S: ByteSource> {
    reader: &'a mut LineReader<S>,
    done: bool,
}

impl<S: ByteSource> Iterator for Lines<'_, S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.reader.read_line(false).transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}
