// SPDX-License-Identifier: MPL-2.0

//! Error types for spectra2d.

use thiserror::Error;

use crate::session::Phase;

/// Main error type for the spectra2d library.
#[derive(Error, Debug)]
pub enum Error {
    /// The image has no pixels.
    #[error("invalid image dimensions {width}x{height}: the image must have at least one row and one column")]
    InvalidDimensions {
        /// Width of the rejected image.
        width: u32,
        /// Height of the rejected image.
        height: u32,
    },

    /// Two buffers that must share dimensions do not.
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Dimensions of the reference buffer.
        expected: (u32, u32),
        /// Dimensions that were given.
        actual: (u32, u32),
    },

    /// A session operation was requested in a phase that does not allow it.
    #[error("cannot {operation} while the session is {phase}")]
    Precondition {
        /// Requested operation.
        operation: &'static str,
        /// Phase the session was in.
        phase: Phase,
    },

    /// Encoding an image for display failed.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type alias for spectra2d operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject images with no pixels.
pub(crate) fn ensure_non_empty(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}
