//! Raster reading module
//!
//! This module decodes encoded images into RGBA raster buffers and provides
//! the small set of pixel helpers the bezel stages share.

mod reader;
mod image_reader;
pub mod types;

pub use reader::RasterReader;
pub use image_reader::ImageRasterReader;
pub use types::{RasterImageData, Rect, alpha_at, ALPHA_OPAQUE, ALPHA_TRANSPARENT};
