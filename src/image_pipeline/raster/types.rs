//! Raster buffer types

use image::RgbaImage;

/// Alpha value of a fully transparent pixel.
pub const ALPHA_TRANSPARENT: u8 = 0;

/// Alpha value of a fully opaque pixel.
pub const ALPHA_OPAQUE: u8 = 255;

/// A decoded image, normalized to 8-bit straight-alpha RGBA.
#[derive(Debug, Clone)]
pub struct RasterImageData {
    /// Row-major RGBA pixels
    pub pixels: RgbaImage,
    /// Whether the encoded source carried an alpha channel.
    /// Sources without one decode to alpha 255 everywhere.
    pub has_alpha: bool,
}

impl RasterImageData {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            has_alpha: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Axis-aligned pixel rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// First column past the right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// First row past the bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[inline]
pub fn alpha_at(image: &RgbaImage, x: u32, y: u32) -> u8 {
    image.get_pixel(x, y)[3]
}
