//! Synthetic bezel templates and screenshots for tests.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::image_pipeline::raster::Rect;

pub(crate) const BEZEL: Rgba<u8> = Rgba([40, 42, 44, 255]);
pub(crate) const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
pub(crate) const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Canvas that is transparent outside `device`, opaque bezel inside it, and
/// transparent again inside `screen`.
pub(crate) fn bezel_template(width: u32, height: u32, device: Rect, screen: Rect) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if screen.contains(x, y) || !device.contains(x, y) {
            CLEAR
        } else {
            BEZEL
        }
    })
}

/// Template with a transparent margin of `margin` pixels around a bezel that is
/// `border` pixels thick.
pub(crate) fn framed_template(width: u32, height: u32, margin: u32, border: u32) -> RgbaImage {
    let device = Rect::new(margin, margin, width - 2 * margin, height - 2 * margin);
    let screen = Rect::new(
        margin + border,
        margin + border,
        width - 2 * (margin + border),
        height - 2 * (margin + border),
    );
    bezel_template(width, height, device, screen)
}

pub(crate) fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

pub(crate) fn encode_png(image: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("in-memory PNG encoding");
    bytes
}
