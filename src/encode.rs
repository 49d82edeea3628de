// SPDX-License-Identifier: MPL-2.0

//! Lossless encoding of 8-bit images for the display side.

use std::io::Cursor;

use image::{GrayImage, ImageFormat};

use crate::error::Result;

/// Lossless 8-bit raster formats an image can be handed over in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable Network Graphics.
    #[default]
    Png,
    /// Windows bitmap.
    Bmp,
}

impl OutputFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
        }
    }

    /// Usual file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }
}

/// Encode a grayscale image in memory.
///
/// # Errors
///
/// Returns [`Error::Encode`](crate::Error::Encode) if the encoder fails.
pub fn encode(image: &GrayImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format.image_format())?;
    tracing::debug!(
        "encoded {}x{} image as {} ({} bytes)",
        image.width(),
        image.height(),
        format.extension(),
        bytes.get_ref().len()
    );
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn decode(bytes: &[u8], format: OutputFormat) -> GrayImage {
        image::load_from_memory_with_format(bytes, format.image_format())
            .unwrap()
            .into_luma8()
    }

    #[test]
    fn test_encoded_pixels_are_preserved() {
        let image = GrayImage::from_fn(7, 5, |x, y| Luma([(x * 36 + y) as u8]));
        for format in [OutputFormat::Png, OutputFormat::Bmp] {
            let bytes = encode(&image, format).unwrap();
            assert_eq!(decode(&bytes, format), image, "{format:?}");
        }
    }

    #[test]
    fn test_png_signature() {
        let bytes = encode(&GrayImage::new(2, 2), OutputFormat::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
