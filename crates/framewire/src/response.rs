//! Decides what a raw response buffer means.

use alloc::string::String;

use crate::extract::{TEXT_MARKER, extract_error_message, extract_string_field};

/// The interpreted result of one response buffer. Computed fresh per
/// response and owned by the caller; nothing is retained across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response carried `candidates[0].content.parts[0].text`; escape
    /// sequences in the value are resolved.
    Text(String),

    /// The response carried an error object.
    ApiError {
        /// Unescaped `error.message` contents. `None` when the error object
        /// is present but no message field could be located — error
        /// confirmed, detail unavailable.
        message: Option<String>,
    },

    /// Neither an error object nor a text field was found, or the field was
    /// truncated. Retrying the request is at the caller's discretion.
    Malformed,
}

/// Interprets raw response bytes.
///
/// The error shape is checked first and always wins: a response containing
/// both an error object and a text field yields [`Outcome::ApiError`],
/// never [`Outcome::Text`].
#[must_use]
pub fn interpret(response: &[u8]) -> Outcome {
    if let Some(message) = extract_error_message(response) {
        return Outcome::ApiError { message };
    }
    match extract_string_field(response, TEXT_MARKER) {
        Some(text) => Outcome::Text(text),
        None => {
            log::debug!("response has neither an error object nor a text field");
            Outcome::Malformed
        }
    }
}
