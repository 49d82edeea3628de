// SPDX-License-Identifier: MPL-2.0

//! Fourier transform and quadrant shift for 2D row-major buffers.

use rustfft::num_traits::Zero;
use rustfft::{num_complex::Complex, FftDirection, FftNum, FftPlanner};

/// Compute the 2D Fourier transform of an image buffer.
///
/// The image buffer is considered to be stored in row major order.
/// Rows are transformed first, then columns.
/// The buffer is transposed back after the column pass,
/// so the output keeps the row major layout of the input.
///
/// The transformation is not normalized.
/// A forward transform followed by [`ifft_2d`] scales every sample by `width * height`.
///
/// Remark: an allocation the size of the image buffer is performed for the transposition,
/// as well as a scratch buffer while performing the rows and columns FFTs.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
pub fn fft_2d<T: FftNum>(width: usize, height: usize, img_buffer: &mut [Complex<T>]) {
    fft_2d_with_direction(width, height, img_buffer, FftDirection::Forward)
}

/// Compute the inverse 2D Fourier transform to get back an image buffer.
///
/// Same layout conventions as [`fft_2d`].
/// The transformation is not normalized,
/// the result is the original buffer multiplied by `width * height`.
///
/// # Panics
///
/// Panics if `width` or `height` is zero.
pub fn ifft_2d<T: FftNum>(width: usize, height: usize, img_buffer: &mut [Complex<T>]) {
    fft_2d_with_direction(width, height, img_buffer, FftDirection::Inverse)
}

fn fft_2d_with_direction<T: FftNum>(
    width: usize,
    height: usize,
    img_buffer: &mut [Complex<T>],
    direction: FftDirection,
) {
    debug_assert_eq!(img_buffer.len(), width * height);

    // Compute the FFT of each row of the image.
    let mut planner = FftPlanner::new();
    let fft_width = planner.plan_fft(width, direction);
    let mut scratch = vec![Complex::zero(); fft_width.get_inplace_scratch_len()];
    for row_buffer in img_buffer.chunks_exact_mut(width) {
        fft_width.process_with_scratch(row_buffer, &mut scratch);
    }

    // Transpose the image to be able to compute the FFT on the other dimension.
    let mut transposed = img_buffer.to_vec();
    transpose_into(width, height, img_buffer, &mut transposed);
    let fft_height = planner.plan_fft(height, direction);
    scratch.resize(fft_height.get_inplace_scratch_len(), Complex::zero());
    for col_buffer in transposed.chunks_exact_mut(height) {
        fft_height.process_with_scratch(col_buffer, &mut scratch);
    }

    // Back to row major.
    transpose_into(height, width, &transposed, img_buffer);
}

/// Write the transposed of the `width x height` row major `matrix` into `transposed`.
fn transpose_into<T: Copy>(width: usize, height: usize, matrix: &[T], transposed: &mut [T]) {
    let mut ind = 0;
    let mut ind_tr;
    for row in 0..height {
        ind_tr = row;
        for _ in 0..width {
            transposed[ind_tr] = matrix[ind];
            ind += 1;
            ind_tr += height;
        }
    }
}

/// Swap the diagonal quadrants of an even sized buffer, in place.
///
/// Top-left is exchanged with bottom-right and top-right with bottom-left.
/// Applying it twice gives back the original buffer.
///
/// # Panics
///
/// Panics if `width` or `height` is odd.
pub fn swap_quadrants<T>(width: usize, height: usize, matrix: &mut [T]) {
    assert!(width % 2 == 0, "width must be even, got {width}");
    assert!(height % 2 == 0, "height must be even, got {height}");
    swap_region_quadrants(width, width, height, matrix);
}

/// Move the zero frequency term of a Fourier transform to the center of the buffer, in place.
///
/// The quadrants are taken in the largest even sized region anchored at the top-left corner.
/// A trailing odd row or column stays where it is.
/// A buffer one sample wide or tall has no such region and is left untouched.
pub fn shift_dft<T>(width: usize, height: usize, matrix: &mut [T]) {
    swap_region_quadrants(width, width & !1, height & !1, matrix);
}

/// Quadrant swap of the `region_width x region_height` top-left region
/// of a row major buffer whose rows are `stride` long.
fn swap_region_quadrants<T>(
    stride: usize,
    region_width: usize,
    region_height: usize,
    matrix: &mut [T],
) {
    if region_width == 0 || region_height == 0 {
        return;
    }
    let half_width = region_width / 2;
    let half_height = region_height / 2;
    let (top, bottom) = matrix[..region_height * stride].split_at_mut(half_height * stride);
    for (t_row, b_row) in top
        .chunks_exact_mut(stride)
        .zip(bottom.chunks_exact_mut(stride))
    {
        let (t_left, t_right) = t_row[..region_width].split_at_mut(half_width);
        let (b_left, b_right) = b_row[..region_width].split_at_mut(half_width);
        t_left.swap_with_slice(b_right);
        t_right.swap_with_slice(b_left);
    }
}
