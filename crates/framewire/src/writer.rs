//! Incremental JSON writer: valid JSON as a sequence of structural calls.

use alloc::vec::Vec;

use crate::{
    buffer::WriteBuf,
    error::{Overflow, WriteError},
};

const HEX: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// Emits syntactically valid JSON through primitive calls (open/close
/// container, key, scalar value) against a caller-owned [`WriteBuf`],
/// tracking only the open-container stack and a pending-separator flag —
/// never a tree.
///
/// Every operation is atomic: it computes its full byte length up front
/// (including escape expansion) and fails with [`WriteError::Overflow`]
/// before writing anything, leaving both the writer state and the cursor
/// unchanged. Structural misuse — a key outside an object, an unmatched
/// close — fails with [`WriteError::InvalidState`], also without writing.
///
/// The writer starts at depth 0 with no container open; a build is complete
/// when it returns to depth 0 after one top-level value.
#[derive(Debug, Default)]
pub struct JsonWriter {
    stack: Vec<Container>,
    needs_separator: bool,
    verbatim_open: bool,
}

impl JsonWriter {
    /// Creates a writer at depth 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current container nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Opens an object, emitting a leading comma first if one is due.
    ///
    /// # Errors
    ///
    /// [`WriteError::Overflow`] if the bracket (and separator) do not fit.
    pub fn begin_object(&mut self, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.open(Container::Object, b'{', out)
    }

    /// Closes the innermost container, which must be an object.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidState`] if no object is open;
    /// [`WriteError::Overflow`] if the bracket does not fit.
    pub fn end_object(&mut self, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.close(Container::Object, b'}', "end_object outside of object", out)
    }

    /// Opens an array, emitting a leading comma first if one is due.
    ///
    /// # Errors
    ///
    /// [`WriteError::Overflow`] if the bracket (and separator) do not fit.
    pub fn begin_array(&mut self, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.open(Container::Array, b'[', out)
    }

    /// Closes the innermost container, which must be an array.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidState`] if no array is open;
    /// [`WriteError::Overflow`] if the bracket does not fit.
    pub fn end_array(&mut self, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.close(Container::Array, b']', "end_array outside of array", out)
    }

    /// Emits `"name":`, escaping `name`, with a leading comma if one is due.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidState`] if the innermost open container is not
    /// an object; [`WriteError::Overflow`] if the key does not fit.
    pub fn key(&mut self, name: &str, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        if self.stack.last() != Some(&Container::Object) {
            log::error!("json writer: key {name:?} outside of object");
            return Err(WriteError::InvalidState("key outside of object"));
        }
        let sep = usize::from(self.needs_separator);
        if out.remaining() < sep + escaped_len(name) + 3 {
            return Err(WriteError::Overflow);
        }
        if self.needs_separator {
            out.push_byte(b',')?;
        }
        out.push_byte(b'"')?;
        write_escaped(name, out)?;
        out.push_bytes(b"\":")?;
        self.needs_separator = false;
        Ok(())
    }

    /// Emits a string value, escaping on write: `"` and `\` get a backslash,
    /// control characters use the named short forms (`\b \f \n \r \t`) or a
    /// numeric escape; everything else passes through unescaped. The input
    /// is assumed to be well-formed text, not arbitrary binary.
    ///
    /// # Errors
    ///
    /// [`WriteError::Overflow`] if the escaped value does not fit.
    pub fn string(&mut self, value: &str, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        let sep = usize::from(self.needs_separator);
        if out.remaining() < sep + escaped_len(value) + 2 {
            return Err(WriteError::Overflow);
        }
        if self.needs_separator {
            out.push_byte(b',')?;
        }
        out.push_byte(b'"')?;
        write_escaped(value, out)?;
        out.push_byte(b'"')?;
        self.needs_separator = true;
        Ok(())
    }

    /// Emits `literal` verbatim. The caller is responsible for supplying
    /// valid JSON numeric syntax; the writer has no numeric formatting of
    /// its own.
    ///
    /// # Errors
    ///
    /// [`WriteError::Overflow`] if the literal does not fit.
    pub fn number(&mut self, literal: &str, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.scalar(literal.as_bytes(), out)
    }

    /// Emits `true` or `false`.
    ///
    /// # Errors
    ///
    /// [`WriteError::Overflow`] if the literal does not fit.
    pub fn boolean(&mut self, value: bool, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.scalar(if value { b"true" } else { b"false" }, out)
    }

    /// Emits `null`.
    ///
    /// # Errors
    ///
    /// [`WriteError::Overflow`] if the literal does not fit.
    pub fn null(&mut self, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.scalar(b"null", out)
    }

    /// Emits a key and a string value as one atomic step.
    ///
    /// # Errors
    ///
    /// As [`key`](Self::key) and [`string`](Self::string); capacity is
    /// checked for the whole pair before anything is written.
    pub fn key_string(
        &mut self,
        name: &str,
        value: &str,
        out: &mut WriteBuf<'_>,
    ) -> Result<(), WriteError> {
        self.check_pair(name, escaped_len(value) + 2, out)?;
        self.key(name, out)?;
        self.string(value, out)
    }

    /// Emits a key and a verbatim numeric literal as one atomic step.
    ///
    /// # Errors
    ///
    /// As [`key`](Self::key) and [`number`](Self::number); capacity is
    /// checked for the whole pair before anything is written.
    pub fn key_number(
        &mut self,
        name: &str,
        literal: &str,
        out: &mut WriteBuf<'_>,
    ) -> Result<(), WriteError> {
        self.check_pair(name, literal.len(), out)?;
        self.key(name, out)?;
        self.number(literal, out)
    }

    /// Emits a key and a boolean as one atomic step.
    ///
    /// # Errors
    ///
    /// As [`key`](Self::key) and [`boolean`](Self::boolean); capacity is
    /// checked for the whole pair before anything is written.
    pub fn key_boolean(
        &mut self,
        name: &str,
        value: bool,
        out: &mut WriteBuf<'_>,
    ) -> Result<(), WriteError> {
        self.check_pair(name, if value { 4 } else { 5 }, out)?;
        self.key(name, out)?;
        self.boolean(value, out)
    }

    /// Emits a key and `null` as one atomic step.
    ///
    /// # Errors
    ///
    /// As [`key`](Self::key) and [`null`](Self::null); capacity is checked
    /// for the whole pair before anything is written.
    pub fn key_null(&mut self, name: &str, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        self.check_pair(name, 4, out)?;
        self.key(name, out)?;
        self.null(out)
    }

    /// Emits the separator (if due) and the opening quote of a string value
    /// whose contents the caller streams directly into `out`, bypassing the
    /// writer's escaping. Only for payloads that cannot require escaping,
    /// such as base64 text.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidState`] if a verbatim string is already open;
    /// [`WriteError::Overflow`] if the quote (and separator) do not fit.
    pub fn begin_verbatim_string(&mut self, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        if self.verbatim_open {
            log::error!("json writer: verbatim string already open");
            return Err(WriteError::InvalidState("verbatim string already open"));
        }
        let sep = usize::from(self.needs_separator);
        if out.remaining() < sep + 1 {
            return Err(WriteError::Overflow);
        }
        if self.needs_separator {
            out.push_byte(b',')?;
        }
        out.push_byte(b'"')?;
        self.needs_separator = false;
        self.verbatim_open = true;
        Ok(())
    }

    /// Emits the closing quote of a string opened with
    /// [`begin_verbatim_string`](Self::begin_verbatim_string) and restores
    /// normal separator tracking.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidState`] if no verbatim string is open;
    /// [`WriteError::Overflow`] if the quote does not fit.
    pub fn end_verbatim_string(&mut self, out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        if !self.verbatim_open {
            log::error!("json writer: end_verbatim_string without an open one");
            return Err(WriteError::InvalidState("no verbatim string open"));
        }
        if out.remaining() < 1 {
            return Err(WriteError::Overflow);
        }
        out.push_byte(b'"')?;
        self.needs_separator = true;
        self.verbatim_open = false;
        Ok(())
    }

    fn open(
        &mut self,
        kind: Container,
        bracket: u8,
        out: &mut WriteBuf<'_>,
    ) -> Result<(), WriteError> {
        let sep = usize::from(self.needs_separator);
        if out.remaining() < sep + 1 {
            return Err(WriteError::Overflow);
        }
        if self.needs_separator {
            out.push_byte(b',')?;
        }
        out.push_byte(bracket)?;
        self.stack.push(kind);
        self.needs_separator = false;
        Ok(())
    }

    fn close(
        &mut self,
        kind: Container,
        bracket: u8,
        what: &'static str,
        out: &mut WriteBuf<'_>,
    ) -> Result<(), WriteError> {
        if self.stack.last() != Some(&kind) {
            log::error!("json writer: {what}");
            return Err(WriteError::InvalidState(what));
        }
        if out.remaining() < 1 {
            return Err(WriteError::Overflow);
        }
        out.push_byte(bracket)?;
        self.stack.pop();
        self.needs_separator = !self.stack.is_empty();
        Ok(())
    }

    fn scalar(&mut self, bytes: &[u8], out: &mut WriteBuf<'_>) -> Result<(), WriteError> {
        let sep = usize::from(self.needs_separator);
        if out.remaining() < sep + bytes.len() {
            return Err(WriteError::Overflow);
        }
        if self.needs_separator {
            out.push_byte(b',')?;
        }
        out.push_bytes(bytes)?;
        self.needs_separator = true;
        Ok(())
    }

    /// Capacity check covering a key plus a value of `value_len` emitted
    /// bytes, so the pair helpers commit either everything or nothing.
    fn check_pair(
        &self,
        name: &str,
        value_len: usize,
        out: &WriteBuf<'_>,
    ) -> Result<(), WriteError> {
        let sep = usize::from(self.needs_separator);
        if out.remaining() < sep + escaped_len(name) + 3 + value_len {
            return Err(WriteError::Overflow);
        }
        Ok(())
    }
}

/// Emitted byte length of `s` under JSON string escaping.
fn escaped_len(s: &str) -> usize {
    s.bytes()
        .map(|b| match b {
            b'"' | b'\\' | 0x08 | 0x0C | b'\n' | b'\r' | b'\t' => 2,
            0x00..=0x1F => 6,
            _ => 1,
        })
        .sum()
}

fn write_escaped(s: &str, out: &mut WriteBuf<'_>) -> Result<(), Overflow> {
    for b in s.bytes() {
        match b {
            b'"' => out.push_bytes(b"\\\"")?,
            b'\\' => out.push_bytes(b"\\\\")?,
            0x08 => out.push_bytes(b"\\b")?,
            0x0C => out.push_bytes(b"\\f")?,
            b'\n' => out.push_bytes(b"\\n")?,
            b'\r' => out.push_bytes(b"\\r")?,
            b'\t' => out.push_bytes(b"\\t")?,
            ctrl @ 0x00..=0x1F => {
                let mut escape = *b"\\u0000";
                escape[4] = HEX[usize::from(ctrl >> 4)];
                escape[5] = HEX[usize::from(ctrl & 0x0F)];
                out.push_bytes(&escape)?;
            }
            other => out.push_byte(other)?,
        }
    }
    Ok(())
}
