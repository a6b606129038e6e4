//! Standard errors that may occur when framing P25 data units.

use thiserror::Error;

/// P25 framing runtime errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum FramerError {
    /// A bit was appended to an already-full message buffer.
    #[error("message buffer is full")]
    BitBufferFull,
}

/// Standard result using `FramerError`.
pub type Result<T> = std::result::Result<T, FramerError>;
