//! Builds the complete JSON request body for one frame in a single pass.

use alloc::string::ToString;

use crate::{
    base64::Base64Encoder,
    buffer::WriteBuf,
    error::BuildError,
    writer::JsonWriter,
};

/// Headroom for every scaffold byte outside the prompt, the MIME type and
/// the base64 payload, including the token-limit digits.
const SCAFFOLD_OVERHEAD: usize = 128;

/// Request knobs that rarely change between captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions<'a> {
    /// MIME type reported for the inline frame data.
    ///
    /// # Default
    ///
    /// `"image/jpeg"` — the frame source only hands over validated JPEG.
    pub mime_type: &'a str,

    /// Value for `generationConfig.maxOutputTokens`.
    ///
    /// # Default
    ///
    /// `100`
    pub max_output_tokens: u32,
}

impl Default for RequestOptions<'_> {
    fn default() -> Self {
        Self {
            mime_type: "image/jpeg",
            max_output_tokens: 100,
        }
    }
}

/// Capacity estimate for a request carrying a frame of `frame_len` bytes:
/// the exact base64 length, twice the prompt and MIME type lengths, and a
/// fixed scaffold overhead.
///
/// The 2x factor covers the escapes that double a byte (`"`, `\`, and the
/// named short forms), which is every escape well-formed text produces. A
/// prompt dense in bare control characters (six bytes each on the wire) can
/// exceed the estimate; [`build_request`] then fails with
/// [`BuildError::Write`] instead of at the pre-flight check.
#[must_use]
pub fn required_capacity(frame_len: usize, prompt: &str, options: &RequestOptions<'_>) -> usize {
    Base64Encoder::encoded_len(frame_len)
        + 2 * prompt.len()
        + 2 * options.mime_type.len()
        + SCAFFOLD_OVERHEAD
}

/// Writes the full request body into `out` and returns the number of bytes
/// written.
///
/// The JSON scaffold goes through the incremental writer; the `data` value
/// streams the frame through the base64 encoder directly into the same
/// buffer between a verbatim pair of quotes (base64 output needs no JSON
/// escaping). The raw frame, its base64 form, and the JSON wrapper are
/// never held in separate buffers: there is exactly one output region,
/// written once, left to right.
///
/// # Errors
///
/// [`BuildError::Capacity`] if `out` is smaller than
/// [`required_capacity`] — checked before anything is written, so the
/// buffer is left untouched. [`BuildError::Write`] if a scaffold write
/// fails despite the estimate, which indicates a caller re-using a
/// partially filled buffer.
pub fn build_request(
    frame: &[u8],
    prompt: &str,
    options: &RequestOptions<'_>,
    out: &mut WriteBuf<'_>,
) -> Result<usize, BuildError> {
    let needed = required_capacity(frame.len(), prompt, options);
    if out.remaining() < needed {
        log::error!(
            "request buffer too small: need {needed} bytes, have {}",
            out.remaining()
        );
        return Err(BuildError::Capacity {
            needed,
            capacity: out.remaining(),
        });
    }

    let start = out.len();
    let mut writer = JsonWriter::new();

    writer.begin_object(out)?;
    writer.key("contents", out)?;
    writer.begin_array(out)?;
    writer.begin_object(out)?;
    writer.key("parts", out)?;
    writer.begin_array(out)?;

    writer.begin_object(out)?;
    writer.key_string("text", prompt, out)?;
    writer.end_object(out)?;

    writer.begin_object(out)?;
    writer.key("inline_data", out)?;
    writer.begin_object(out)?;
    writer.key_string("mime_type", options.mime_type, out)?;
    writer.key("data", out)?;

    writer.begin_verbatim_string(out)?;
    let mut encoder = Base64Encoder::new();
    encoder.encode_chunk(frame, out)?;
    encoder.finalize(out)?;
    writer.end_verbatim_string(out)?;

    writer.end_object(out)?; // inline_data
    writer.end_object(out)?; // image part
    writer.end_array(out)?; // parts
    writer.end_object(out)?; // content item
    writer.end_array(out)?; // contents

    writer.key("generationConfig", out)?;
    writer.begin_object(out)?;
    writer.key_number("maxOutputTokens", &options.max_output_tokens.to_string(), out)?;
    writer.end_object(out)?;

    writer.end_object(out)?; // root

    Ok(out.len() - start)
}
