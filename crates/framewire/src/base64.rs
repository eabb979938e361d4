//! Streaming base64 encoder with a 0–2 byte carry between chunks.

use crate::{buffer::WriteBuf, error::Overflow};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard-alphabet (RFC 4648) base64 encoder that accepts input in
/// arbitrary-sized chunks.
///
/// At most two unconsumed input bytes are carried between calls, so the
/// encoded output of a stream is byte-identical no matter how the stream is
/// split into chunks. The encoder allocates nothing and needs no memory
/// beyond this struct.
///
/// A stream is: zero or more [`encode_chunk`](Self::encode_chunk) calls,
/// then exactly one [`finalize`](Self::finalize), which flushes the final
/// partial group with `=` padding and resets the carry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Base64Encoder {
    pending: [u8; 2],
    pending_len: u8,
}

impl Base64Encoder {
    /// Creates an encoder with an empty carry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact encoded length for `input_len` bytes, padding included.
    #[must_use]
    pub const fn encoded_len(input_len: usize) -> usize {
        input_len.div_ceil(3) * 4
    }

    /// Encodes `input`, emitting one four-character group per completed
    /// three-byte group. Any 1–2 trailing bytes are stored in the carry
    /// rather than emitted. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Overflow`] if `out` cannot hold everything this call would emit.
    /// In that case nothing is written and the carry is unchanged.
    pub fn encode_chunk(
        &mut self,
        input: &[u8],
        out: &mut WriteBuf<'_>,
    ) -> Result<usize, Overflow> {
        let groups = (self.pending_len as usize + input.len()) / 3;
        if out.remaining() < groups * 4 {
            return Err(Overflow);
        }

        let start = out.len();
        let mut rest = input;

        // Top the carry up to a full group before walking whole groups.
        if self.pending_len > 0 {
            let have = self.pending_len as usize;
            let need = 3 - have;
            if rest.len() < need {
                for &b in rest {
                    self.pending[self.pending_len as usize] = b;
                    self.pending_len += 1;
                }
                return Ok(0);
            }
            let mut group = [0u8; 3];
            group[..have].copy_from_slice(&self.pending[..have]);
            group[have..].copy_from_slice(&rest[..need]);
            encode_group(&group, out)?;
            rest = &rest[need..];
            self.pending_len = 0;
        }

        let whole = rest.len() / 3 * 3;
        for group in rest[..whole].chunks_exact(3) {
            encode_group(group, out)?;
        }

        let tail = &rest[whole..];
        self.pending[..tail.len()].copy_from_slice(tail);
        self.pending_len = tail.len() as u8;

        Ok(out.len() - start)
    }

    /// Flushes the final partial group, padding with `=` to a four-character
    /// group (two pads for one pending byte, one pad for two), then resets
    /// the carry. With an empty carry this writes nothing and returns 0, so
    /// a second `finalize` without an intervening chunk is a no-op.
    ///
    /// # Errors
    ///
    /// [`Overflow`] if the final group does not fit; nothing is written and
    /// the carry is unchanged.
    pub fn finalize(&mut self, out: &mut WriteBuf<'_>) -> Result<usize, Overflow> {
        if self.pending_len == 0 {
            return Ok(0);
        }
        if out.remaining() < 4 {
            return Err(Overflow);
        }

        // Left-align the pending bytes in a 24-bit group, missing bytes zero.
        let triple =
            (u32::from(self.pending[0]) << 16) | (u32::from(self.pending[1]) << 8);
        let group = if self.pending_len == 1 {
            [
                ALPHABET[((triple >> 18) & 0x3F) as usize],
                ALPHABET[((triple >> 12) & 0x3F) as usize],
                b'=',
                b'=',
            ]
        } else {
            [
                ALPHABET[((triple >> 18) & 0x3F) as usize],
                ALPHABET[((triple >> 12) & 0x3F) as usize],
                ALPHABET[((triple >> 6) & 0x3F) as usize],
                b'=',
            ]
        };
        out.push_bytes(&group)?;
        self.pending_len = 0;
        Ok(4)
    }

    /// One-shot convenience: encodes `input` as a single chunk and
    /// finalizes. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Overflow`] if `out` has less than
    /// [`encoded_len(input.len())`](Self::encoded_len) remaining; nothing is
    /// written.
    pub fn encode(input: &[u8], out: &mut WriteBuf<'_>) -> Result<usize, Overflow> {
        if out.remaining() < Self::encoded_len(input.len()) {
            return Err(Overflow);
        }
        let mut encoder = Self::new();
        let written = encoder.encode_chunk(input, out)?;
        Ok(written + encoder.finalize(out)?)
    }
}

#[inline]
fn encode_group(group: &[u8], out: &mut WriteBuf<'_>) -> Result<(), Overflow> {
    let triple =
        (u32::from(group[0]) << 16) | (u32::from(group[1]) << 8) | u32::from(group[2]);
    out.push_bytes(&[
        ALPHABET[((triple >> 18) & 0x3F) as usize],
        ALPHABET[((triple >> 12) & 0x3F) as usize],
        ALPHABET[((triple >> 6) & 0x3F) as usize],
        ALPHABET[(triple & 0x3F) as usize],
    ])
}
