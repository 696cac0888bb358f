//! Sequential big-endian read/write helpers over a byte buffer.
//!
//! The encoder writes into a preallocated `Vec<u8>`; the decoder reads from
//! an `impl Read`. Both are thin enough that we don't reach for `byteorder`
//! here — the teacher keeps this inline, and there's only ever one width
//! (`u32`) plus single bytes to move.

use std::io::{self, Read};

/// Appends bytes to an in-progress encode buffer.
pub struct ByteWriter<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> ByteWriter<'a> {
    #[inline]
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    pub fn write_u32_be(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }
}

/// Reads big-endian primitives off an `impl Read`, tracking nothing itself —
/// EOF is surfaced as `io::Error` and translated by the caller.
pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read> ByteReader<R> {
    #[inline]
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    pub fn read_bytes(&mut self, out: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(out)
    }

    #[inline]
    pub fn read_u32_be(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }
}
