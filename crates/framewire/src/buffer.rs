//! Caller-owned output region with a bounds-checked write cursor.

use crate::error::Overflow;

/// A view over a caller-owned byte region with a live write cursor.
///
/// Every write either fully succeeds or fails with [`Overflow`] without
/// advancing the cursor, and the cursor never exceeds the underlying
/// capacity. After a failed write the bytes placed by earlier calls are
/// still intact, but the buffer as a whole should be discarded and the
/// operation retried with a larger region, not patched in place.
#[derive(Debug)]
pub struct WriteBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> WriteBuf<'a> {
    /// Wraps `buf` with the cursor at zero.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity of the underlying region.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Capacity not yet written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Resets the cursor to zero without touching the underlying bytes.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// [`Overflow`] if the buffer is full; the cursor is unchanged.
    pub fn push_byte(&mut self, byte: u8) -> Result<(), Overflow> {
        if self.remaining() < 1 {
            return Err(Overflow);
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Appends `bytes` in full.
    ///
    /// # Errors
    ///
    /// [`Overflow`] if `bytes` does not fit; none of it is written and the
    /// cursor is unchanged.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), Overflow> {
        if self.remaining() < bytes.len() {
            return Err(Overflow);
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    /// Appends the UTF-8 bytes of `s` in full.
    ///
    /// # Errors
    ///
    /// [`Overflow`] if `s` does not fit; the cursor is unchanged.
    pub fn push_str(&mut self, s: &str) -> Result<(), Overflow> {
        self.push_bytes(s.as_bytes())
    }
}
