// SPDX-License-Identifier: MPL-2.0

//! Visualization of the magnitude of a complex spectrum.

use image::GrayImage;

use crate::complex::{ComplexImage, Plane};
use crate::normalize::min_max_plane;
use crate::slice::shift_dft;

/// How the magnitude spectrum is turned into an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualizeOptions {
    /// Compress the magnitude with `ln(1 + m)`.
    pub log_scale: bool,

    /// Move the zero frequency term to the center with the quadrant swap.
    pub shift_quadrants: bool,
}

impl Default for VisualizeOptions {
    fn default() -> Self {
        Self {
            log_scale: true,
            shift_quadrants: true,
        }
    }
}

/// Per-pixel magnitude `sqrt(re^2 + im^2)` of two planes.
///
/// # Panics
///
/// Panics if the planes do not have the same dimensions.
pub fn magnitude(real: &Plane, imag: &Plane) -> Plane {
    assert_eq!(real.dimensions(), imag.dimensions());
    let mut mag = real.clone();
    for (m, im) in mag.iter_mut().zip(imag.iter()) {
        *m = m.hypot(*im);
    }
    mag
}

/// Log compressed magnitude `ln(1 + m)` of a complex image.
pub fn log_magnitude(complex: &ComplexImage) -> Plane {
    let (real, imag) = complex.split();
    let mut mag = magnitude(&real, &imag);
    mag.iter_mut().for_each(|m| *m = m.ln_1p());
    mag
}

/// Magnitude spectrum before normalization.
///
/// Applies the log compression and the quadrant swap as configured.
pub fn shifted_log_magnitude(complex: &ComplexImage, options: &VisualizeOptions) -> Plane {
    let mut mag = if options.log_scale {
        log_magnitude(complex)
    } else {
        let (real, imag) = complex.split();
        magnitude(&real, &imag)
    };
    if options.shift_quadrants {
        let (width, height) = mag.dimensions();
        let samples: &mut [f32] = &mut mag;
        shift_dft(width as usize, height as usize, samples);
    }
    mag
}

/// Displayable magnitude spectrum of a complex image, with the default options.
pub fn magnitude_spectrum(complex: &ComplexImage) -> GrayImage {
    magnitude_spectrum_with(complex, &VisualizeOptions::default())
}

/// Displayable magnitude spectrum of a complex image.
///
/// The magnitude goes through [`shifted_log_magnitude`]
/// and is then stretched to `[0, 255]`.
pub fn magnitude_spectrum_with(complex: &ComplexImage, options: &VisualizeOptions) -> GrayImage {
    min_max_plane(&shifted_log_magnitude(complex, options))
}
