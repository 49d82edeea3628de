// SPDX-License-Identifier: MPL-2.0

//! Reconstruction of the spatial image from its spectrum.

use image::GrayImage;

use crate::complex::{inverse_transform, ComplexImage, Plane};
use crate::normalize::min_max_plane;

/// Invert the spectrum in place and return the restored image.
///
/// The real plane of the inverse DFT is stretched to `[0, 255]`.
/// There is no division by `width * height`:
/// the min-max stretch absorbs that constant factor.
/// No quadrant swap is undone since the spectrum itself is never shifted.
pub fn reconstruct(complex: &mut ComplexImage) -> GrayImage {
    inverse_transform(complex);
    min_max_plane(&restored_plane(complex))
}

/// Real plane of an already inverted complex image, before normalization.
pub fn restored_plane(complex: &ComplexImage) -> Plane {
    complex.real()
}
