// SPDX-License-Identifier: MPL-2.0

//! Padding of images to sizes the FFT handles efficiently.

use image::{imageops, GrayImage, Luma};

use crate::error::{ensure_non_empty, Result};

/// Smallest length `>= n` of the form `2^a * 3^b * 5^c`.
///
/// Lengths made of these small factors are the fastest for the mixed radix FFT.
/// Returns 1 for `n <= 1`.
pub fn optimal_dft_size(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let mut best = usize::MAX;
    let mut p2 = 1usize;
    while p2 < best {
        let mut p23 = p2;
        while p23 < best {
            // Smallest power of 5 bringing p23 to at least n.
            let mut p235 = p23;
            while p235 < n {
                p235 = p235.saturating_mul(5);
            }
            best = best.min(p235);
            if p23 >= n {
                break;
            }
            p23 = p23.saturating_mul(3);
        }
        if p2 >= n {
            break;
        }
        p2 = p2.saturating_mul(2);
    }
    best
}

/// Whether `n` only has 2, 3 and 5 as prime factors.
pub fn is_optimal_dft_size(n: usize) -> bool {
    if n == 0 {
        return false;
    }
    let mut rest = n;
    for factor in [2, 3, 5] {
        while rest % factor == 0 {
            rest /= factor;
        }
    }
    rest == 1
}

/// Pad an image with zeros on the bottom and right edges
/// up to the optimal DFT size of each axis.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`](crate::Error::InvalidDimensions)
/// if the image has no pixels.
pub fn pad(image: &GrayImage) -> Result<GrayImage> {
    pad_with(image, 0)
}

/// Same as [`pad`] with a custom constant border value.
///
/// # Errors
///
/// Returns [`Error::InvalidDimensions`](crate::Error::InvalidDimensions)
/// if the image has no pixels.
pub fn pad_with(image: &GrayImage, fill: u8) -> Result<GrayImage> {
    let (width, height) = image.dimensions();
    ensure_non_empty(width, height)?;
    Ok(extend(image, fill))
}

/// Padding of an image already known to have pixels.
pub(crate) fn extend(image: &GrayImage, fill: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    let padded_width = optimal_dft_size(width as usize) as u32;
    let padded_height = optimal_dft_size(height as usize) as u32;
    tracing::debug!("padding {width}x{height} to {padded_width}x{padded_height}");
    if (padded_width, padded_height) == (width, height) {
        return image.clone();
    }
    let mut padded = GrayImage::from_pixel(padded_width, padded_height, Luma([fill]));
    imageops::replace(&mut padded, image, 0, 0);
    padded
}
