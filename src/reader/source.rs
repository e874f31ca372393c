//! Byte sources
//!
//! The only boundary the reader depends on.

use std::io::{self, ErrorKind, Read};

/// A blocking source of bytes
pub trait ByteSource {
    /// Read available bytes into `dst`, blocking until at least one byte is
    /// available or the source ends.
    ///
    /// Returns the number of bytes read; `0` (for a non-empty `dst`) means
    /// the source has ended.
    fn read_into(&mut self, dst: &mut [u8]) -> io::Result<usize>;

    /// Read a single byte, or `None` once the source has ended
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.read_into(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// Release the underlying handle
    fn close(&mut self) -> io::Result<()>;
}

/// Adapter from any [`Read`] to a [`ByteSource`].
///
/// Closing drops the wrapped reader, which releases its handle; reads after
/// that fail with [`ErrorKind::NotConnected`].
pub struct ReadSource<R> {
    inner: Option<R>,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner: Some(inner) }
    }

    /// The wrapped reader, unless already closed
    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }

    /// Unwrap the reader, unless already closed
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }

    fn reader(&mut self) -> io::Result<&mut R> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::new(ErrorKind::NotConnected, "source closed"))
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn read_into(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let reader = self.reader()?;
        loop {
            match reader.read(dst) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.inner.take();
        Ok(())
    }
}
