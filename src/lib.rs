// SPDX-License-Identifier: MPL-2.0

//! Frequency domain view of grayscale images.
//!
//! An image is padded to FFT friendly dimensions, turned into a complex image
//! and transformed with a 2D DFT. The log magnitude of the spectrum, with its
//! zero frequency moved to the center, gives an image for display.
//! The inverse DFT of the same spectrum, stretched back to `[0, 255]`,
//! restores the original.
//!
//! ```
//! use image::{GrayImage, Luma};
//! use spectra2d::Session;
//!
//! # fn main() -> spectra2d::Result<()> {
//! let image = GrayImage::from_fn(30, 20, |x, y| Luma([(x * y) as u8]));
//! let session = Session::new().load(image)?;
//! let (session, spectrum) = session.transform();
//! let (_session, restored) = session.antitransform();
//! assert_eq!(spectrum.dimensions(), (30, 20));
//! assert_eq!(restored.dimensions(), (30, 20));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod complex;
pub mod encode;
pub mod error;
pub mod magnitude;
pub mod normalize;
pub mod pad;
pub mod reconstruct;
pub mod session;

// default implementation on mutable slices
pub mod slice;

pub use complex::{forward_transform, inverse_transform, ComplexImage, Plane};
pub use encode::{encode, OutputFormat};
pub use error::{Error, Result};
pub use magnitude::{magnitude_spectrum, magnitude_spectrum_with, VisualizeOptions};
pub use pad::{optimal_dft_size, pad, pad_with};
pub use reconstruct::reconstruct;
pub use session::{Actions, DynSession, Output, Phase, Session, SessionConfig};
