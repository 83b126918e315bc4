//! Raster reader backed by the `image` crate.
//!
//! Any format the enabled `image` codecs understand is accepted; the format is
//! guessed from the leading bytes rather than a file extension.

use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::raster::types::RasterImageData;
use crate::image_pipeline::raster::reader::RasterReader;

pub struct ImageRasterReader;

impl RasterReader for ImageRasterReader {
    /// Decodes `data` and converts it to 8-bit RGBA.
    ///
    /// The returned [`RasterImageData::has_alpha`] reflects the color type of
    /// the encoded source, so callers can reject templates that cannot carry
    /// a transparent screen region.
    fn read_raster(&self, data: &[u8]) -> Result<RasterImageData> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let has_alpha = decoded.color().has_alpha();
        let pixels = decoded.into_rgba8();

        debug!(
            "Decoded image: {}x{} (alpha: {})",
            pixels.width(),
            pixels.height(),
            has_alpha
        );

        Ok(RasterImageData { pixels, has_alpha })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: image::DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_reads_rgba_png() {
        let source = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 0]));
        let bytes = encode_png(source.clone().into());

        let raster = ImageRasterReader.read_raster(&bytes).unwrap();

        assert!(raster.has_alpha);
        assert_eq!(raster.pixels, source);
    }

    #[test]
    fn test_rgb_png_reports_missing_alpha() {
        let bytes = encode_png(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])).into());

        let raster = ImageRasterReader.read_raster(&bytes).unwrap();

        assert!(!raster.has_alpha);
        assert_eq!(raster.pixels.get_pixel(1, 1), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = ImageRasterReader.read_raster(b"definitely not an image");
        assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    }
}
