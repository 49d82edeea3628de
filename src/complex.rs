// SPDX-License-Identifier: MPL-2.0

//! Complex valued images and their forward / inverse 2D DFT.

use image::{GrayImage, ImageBuffer, Luma};
use rustfft::num_complex::Complex;

use crate::error::{Error, Result};
use crate::slice::{fft_2d, ifft_2d};

/// One 32-bit float plane, row major.
pub type Plane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// A complex image: a real and an imaginary plane of identical dimensions,
/// stored interleaved in row major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexImage {
    width: u32,
    height: u32,
    data: Vec<Complex<f32>>,
}

impl ComplexImage {
    /// Build a complex image from a grayscale image.
    /// The real plane holds the samples and the imaginary plane is zero.
    pub fn from_real(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        let data = image
            .as_raw()
            .iter()
            .map(|&pix| Complex::new(f32::from(pix), 0.0))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Merge a real and an imaginary plane into a complex image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes do not share dimensions.
    pub fn merge(real: &Plane, imag: &Plane) -> Result<Self> {
        if real.dimensions() != imag.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: real.dimensions(),
                actual: imag.dimensions(),
            });
        }
        let (width, height) = real.dimensions();
        let data = real
            .as_raw()
            .iter()
            .zip(imag.as_raw())
            .map(|(&re, &im)| Complex::new(re, im))
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Split into the (real, imaginary) planes.
    pub fn split(&self) -> (Plane, Plane) {
        let imag = self.data.iter().map(|c| c.im).collect();
        (self.real(), self.plane(imag))
    }

    /// Real plane only.
    pub fn real(&self) -> Plane {
        self.plane(self.data.iter().map(|c| c.re).collect())
    }

    fn plane(&self, values: Vec<f32>) -> Plane {
        let width = self.width as usize;
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            Luma([values[y as usize * width + x as usize]])
        })
    }

    /// `(width, height)` of both planes.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Samples in row major order.
    pub fn as_slice(&self) -> &[Complex<f32>] {
        &self.data
    }

    /// Mutable samples in row major order.
    pub fn as_mut_slice(&mut self) -> &mut [Complex<f32>] {
        &mut self.data
    }

    /// Apply the forward 2D DFT in place.
    pub fn forward(&mut self) {
        tracing::debug!("forward dft on {}x{}", self.width, self.height);
        fft_2d(self.width as usize, self.height as usize, &mut self.data);
    }

    /// Apply the inverse 2D DFT in place.
    ///
    /// The result is not divided by the number of samples:
    /// after [`forward`](Self::forward) then `inverse`,
    /// every sample is the original one multiplied by `width * height`.
    pub fn inverse(&mut self) {
        tracing::debug!("inverse dft on {}x{}", self.width, self.height);
        ifft_2d(self.width as usize, self.height as usize, &mut self.data);
    }
}

/// Convert a (padded) grayscale image to a complex image and compute its 2D DFT.
///
/// # Panics
///
/// Panics if the image has no pixels. Use [`pad`](crate::pad::pad) first,
/// which rejects empty images.
pub fn forward_transform(padded: &GrayImage) -> ComplexImage {
    let mut complex = ComplexImage::from_real(padded);
    complex.forward();
    complex
}

/// Apply the unnormalized inverse 2D DFT in place.
pub fn inverse_transform(complex: &mut ComplexImage) {
    complex.inverse();
}
