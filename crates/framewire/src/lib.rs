//! Bounded-memory codecs that turn a captured camera frame into a
//! well-formed JSON inference request, and a raw JSON response back into a
//! single text or error field — without ever materializing a document model
//! or a second full copy of the payload.
//!
//! The crate targets devices with a hard memory ceiling, so every encoder
//! writes into a caller-owned [`WriteBuf`] and fails closed on overflow:
//!
//! - [`Base64Encoder`] accepts binary input in arbitrary-sized chunks and
//!   carries at most two unconsumed bytes between calls.
//! - [`JsonWriter`] emits valid JSON as a sequence of structural calls,
//!   tracking only the open-container stack.
//! - [`extract_string_field`] locates one named string field in an untrusted
//!   response by marker search with escape awareness, without a parser.
//! - [`build_request`] composes the writer and the encoder into a single
//!   left-to-right pass over one output buffer.
//! - [`interpret`] classifies a response as success text, API error, or
//!   malformed.
//!
//! All operations are pure, synchronous computation over caller-supplied
//! memory; nothing blocks, suspends, or performs I/O. Transport, camera
//! hardware, and flash control are external collaborators that produce and
//! consume the byte buffers handled here.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod base64;
mod buffer;
mod error;
mod extract;
mod payload;
mod response;
mod writer;


pub use self::base64::Base64Encoder;
pub use buffer::WriteBuf;
pub use error::{BuildError, Overflow, WriteError};
pub use extract::{
    ERROR_MARKER, MESSAGE_MARKER, TEXT_MARKER, extract_error_message, extract_string_field,
};
pub use payload::{RequestOptions, build_request, required_capacity};
pub use response::{Outcome, interpret};
pub use writer::JsonWriter;
