//! Image encoding: `DynamicImage` → PNG or JPEG bytes.
//!
//! PNG uses the encoder's default settings. JPEG is fixed at quality 95 —
//! high enough that rendered text stays legible, small enough that a
//! 300-DPI page does not balloon to PNG sizes. pdfium hands back RGBA
//! rasters; JPEG has no alpha channel, so those are flattened to RGB
//! before encoding.

use crate::config::ImageFormat;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// JPEG encoder quality.
pub const JPEG_QUALITY: u8 = 95;

/// Encode a rasterised page in the requested format.
pub fn encode_image(
    img: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();

    match format {
        ImageFormat::Png => {
            img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
        }
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY))?;
        }
    }

    debug!("Encoded page image → {} bytes ({})", buf.len(), format);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn encode_png_produces_png_signature() {
        let bytes = encode_image(&solid_image(), ImageFormat::Png).expect("encode should succeed");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn encode_jpeg_produces_jfif_signature() {
        let bytes = encode_image(&solid_image(), ImageFormat::Jpeg).expect("encode should succeed");
        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_jpeg_accepts_rgba_input() {
        // Transparent pixels must flatten, not fail.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 0])));
        assert!(encode_image(&img, ImageFormat::Jpeg).is_ok());
    }
}
