// SPDX-License-Identifier: MPL-2.0

//! Min-max normalization of float samples to displayable 8-bit values.

use image::GrayImage;

use crate::complex::Plane;

/// Minimum and maximum of the finite values, `None` if there is none.
pub fn value_range(values: &[f32]) -> Option<(f32, f32)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Linearly map values to `[0, 255]`, the minimum going to 0 and the maximum to 255.
///
/// When all values are equal there is no spread to stretch
/// and every output sample is 0. Non-finite values also map to 0.
pub fn min_max(values: &[f32]) -> Vec<u8> {
    let Some((min, max)) = value_range(values) else {
        return vec![0; values.len()];
    };
    tracing::debug!("normalizing range [{min}, {max}]");
    let spread = max - min;
    if spread == 0.0 {
        return vec![0; values.len()];
    }
    let scale = 255.0 / spread;
    values
        .iter()
        .map(|&v| {
            if v.is_finite() {
                to_u8((v - min) * scale)
            } else {
                0
            }
        })
        .collect()
}

/// [`min_max`] over a whole plane, keeping its dimensions.
pub fn min_max_plane(plane: &Plane) -> GrayImage {
    let (width, height) = plane.dimensions();
    let raw = min_max(plane.as_raw());
    GrayImage::from_fn(width, height, |x, y| {
        image::Luma([raw[y as usize * width as usize + x as usize]])
    })
}

/// Round to nearest and saturate.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
