//! Error types for soft3d-core operations.
//!
//! The numeric kernel reports almost nothing through errors: singular
//! inversion, zero-length normalization and domain violations on the fast
//! approximations all produce documented degraded values instead. The one
//! fallible surface is the array stream codec, whose input comes from outside
//! the process.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_core::{Error, Result};
//!
//! fn check_header(count: i32) -> Result<usize> {
//!     if count < 0 {
//!         return Err(Error::NegativeLength(count));
//!     }
//!     Ok(count as usize)
//! }
//!
//! assert!(check_header(-1).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::shared_array::SharedArray`] - Stream encode/decode

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while streaming typed arrays in or out.
///
/// # Categories
///
/// - **Header errors**: [`NegativeLength`](Error::NegativeLength), [`LengthOverflow`](Error::LengthOverflow)
/// - **Payload errors**: [`Truncated`](Error::Truncated)
/// - **I/O errors**: [`Io`](Error::Io)
#[derive(Debug, Error)]
pub enum Error {
    /// The length header of a streamed array is negative.
    #[error("negative element count {0} in array header")]
    NegativeLength(i32),

    /// An array is too long for the `i32` length header.
    #[error("array of {0} elements does not fit an i32 length header")]
    LengthOverflow(usize),

    /// The stream ended before every announced element was read.
    ///
    /// # Example
    ///
    /// ```rust
    /// use soft3d_core::Error;
    ///
    /// let err = Error::truncated(5, 3);
    /// assert!(err.to_string().contains("expected 5"));
    /// ```
    #[error("array truncated: expected {expected} elements, read {read}")]
    Truncated {
        /// Element count announced by the header
        expected: usize,
        /// Elements decoded before the stream ran out
        read: usize,
    },

    /// I/O error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::Truncated`] error.
    #[inline]
    pub fn truncated(expected: usize, read: usize) -> Self {
        Self::Truncated { expected, read }
    }

    /// Returns `true` if the stream header itself was malformed.
    #[inline]
    pub fn is_header_error(&self) -> bool {
        matches!(self, Self::NegativeLength(_) | Self::LengthOverflow(_))
    }

    /// Returns `true` if this is an I/O error.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_message() {
        let err = Error::truncated(10, 4);
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("4"));
        assert!(!err.is_header_error());
    }

    #[test]
    fn test_header_errors() {
        assert!(Error::NegativeLength(-3).is_header_error());
        assert!(Error::LengthOverflow(usize::MAX).is_header_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(err.is_io_error());
    }
}
