//! Marker-based extraction of single string fields from response bytes.
//!
//! This is deliberately not a JSON parser. The upstream response shape is a
//! known, fixed schema — one nested text field, or one error/message field —
//! so a field is located by literal substring search for its key, colon, and
//! opening quote, and the value is scanned forward with escape awareness.
//! The trade-off is brittleness: a response that spells the key differently
//! or puts different whitespace around the colon will not match and is
//! reported as absent. That limitation is accepted here by design, in
//! exchange for never building a document model over an untrusted buffer.

use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;

/// Marker for the success text field, `candidates[0].content.parts[0].text`.
pub const TEXT_MARKER: &[u8] = b"\"text\": \"";

/// Marker for the top-level error object.
pub const ERROR_MARKER: &[u8] = b"\"error\": {";

/// Marker for the message field inside an error object.
pub const MESSAGE_MARKER: &[u8] = b"\"message\": \"";

/// Locates `marker` in `response` and returns the string value that follows
/// it, with escape sequences resolved.
///
/// The scan tracks an in-escape flag: a literal backslash is skipped and the
/// next byte is mapped through the fixed escape table (`n r t b f` become
/// their control characters, anything else passes through); an unescaped
/// `"` terminates the value and is excluded from it.
///
/// Returns `None` when the marker is absent, when the buffer ends before an
/// unescaped closing quote (truncated response), or when the decoded bytes
/// are not valid UTF-8.
#[must_use]
pub fn extract_string_field(response: &[u8], marker: &[u8]) -> Option<String> {
    let start = response.find(marker)? + marker.len();

    let mut value = Vec::new();
    let mut in_escape = false;
    for &b in &response[start..] {
        if in_escape {
            value.push(match b {
                b'n' => b'\n',
                b'r' => b'\r',
                b't' => b'\t',
                b'b' => 0x08,
                b'f' => 0x0C,
                other => other,
            });
            in_escape = false;
        } else if b == b'\\' {
            in_escape = true;
        } else if b == b'"' {
            return String::from_utf8(value).ok();
        } else {
            value.push(b);
        }
    }

    log::debug!("string value after marker is unterminated");
    None
}

/// Checks `response` for an error-object shape.
///
/// Returns `None` when no error object is present (not an error),
/// `Some(Some(message))` with the unescaped `error.message` when one is
/// found, and `Some(None)` when the error object exists but no message
/// field follows it — error present, detail unavailable, which is distinct
/// from "no error". The message search starts at the error object's
/// position, never before it.
#[must_use]
pub fn extract_error_message(response: &[u8]) -> Option<Option<String>> {
    let at = response.find(ERROR_MARKER)?;
    Some(extract_string_field(&response[at..], MESSAGE_MARKER))
}
