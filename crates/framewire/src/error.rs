use thiserror::Error;

/// A write would exceed the remaining capacity of a
/// [`WriteBuf`](crate::WriteBuf).
///
/// Overflow is always recoverable: the failing call commits nothing and the
/// cursor does not advance, so the caller can discard the buffer and retry
/// with a larger one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("output buffer overflow")]
pub struct Overflow;

/// Errors returned by [`JsonWriter`](crate::JsonWriter) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The output buffer cannot hold what this operation would emit,
    /// including escape expansion. Recoverable; see [`Overflow`].
    #[error("output buffer overflow")]
    Overflow,

    /// The operation is not legal in the writer's current state, e.g. a key
    /// outside an object or an unmatched closing bracket. This is a
    /// programming error in the call sequence and should end the current
    /// build rather than be retried.
    #[error("invalid writer state: {0}")]
    InvalidState(&'static str),
}

impl From<Overflow> for WriteError {
    fn from(_: Overflow) -> Self {
        WriteError::Overflow
    }
}

/// Errors returned by [`build_request`](crate::build_request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The output buffer is smaller than the conservative pre-flight
    /// estimate. Nothing has been written; retry with a larger buffer.
    #[error("request buffer too small: need at least {needed} bytes, have {capacity}")]
    Capacity {
        /// The pre-flight estimate of the required capacity.
        needed: usize,
        /// The capacity the caller actually provided.
        capacity: usize,
    },

    /// A writer or encoder operation failed while emitting the request.
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl From<Overflow> for BuildError {
    fn from(_: Overflow) -> Self {
        BuildError::Write(WriteError::Overflow)
    }
}
