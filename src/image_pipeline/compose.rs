//! Screenshot compositing.
//!
//! The masked screenshot is placed pixel-for-pixel at the inner frame of an
//! empty canvas, then the bezel template is drawn over the whole canvas with
//! source-over blending. Screenshots are cropped to the inner frame, never
//! resampled.

use image::{GrayImage, Rgba, RgbaImage};
use tracing::debug;

use crate::image_pipeline::bezel::BezelFrame;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raster::{ALPHA_OPAQUE, ALPHA_TRANSPARENT};

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, ALPHA_TRANSPARENT]);

/// Straight-alpha source-over of `src` onto `dst`.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match (src[3], dst[3]) {
        (ALPHA_TRANSPARENT, _) => dst,
        (ALPHA_OPAQUE, _) | (_, ALPHA_TRANSPARENT) => src,
        (src_alpha, dst_alpha) => {
            let sa = src_alpha as f32 / 255.0;
            let da = dst_alpha as f32 / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let channel = |s: u8, d: u8| {
                let value = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
                value.round().clamp(0.0, 255.0) as u8
            };
            Rgba([
                channel(src[0], dst[0]),
                channel(src[1], dst[1]),
                channel(src[2], dst[2]),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ])
        }
    }
}

/// Draws `top` onto `canvas` with its top-left corner at `(x, y)`, clipped to the canvas.
fn overlay(canvas: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let (tx, ty) = (x + dx, y + dy);
        if tx < canvas.width() && ty < canvas.height() {
            let blended = blend_over(*canvas.get_pixel(tx, ty), *pixel);
            canvas.put_pixel(tx, ty, blended);
        }
    }
}

/// Keeps screenshot pixels where `mask` is non-zero and clears the rest.
///
/// The result has the mask's dimensions. Screenshot pixels beyond the mask are
/// dropped, and mask pixels beyond the screenshot stay transparent.
pub fn apply_mask(screenshot: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
        let inside = x < screenshot.width() && y < screenshot.height();
        if inside && mask.get_pixel(x, y).0[0] != 0 {
            *screenshot.get_pixel(x, y)
        } else {
            CLEAR
        }
    })
}

fn allocate_canvas(width: u32, height: u32) -> Result<RgbaImage> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| {
            ConversionError::CompositeError(format!("canvas of {}x{} is too large", width, height))
        })?;
    RgbaImage::from_raw(width, height, vec![0; len]).ok_or_else(|| {
        ConversionError::CompositeError("canvas buffer does not match its size".to_string())
    })
}

/// Produces the final image: masked screenshot at the inner frame, template on top.
///
/// The output always has the template's dimensions.
pub fn composite(
    screenshot: &RgbaImage,
    template: &RgbaImage,
    mask: &GrayImage,
    frame: &BezelFrame,
) -> Result<RgbaImage> {
    if template.dimensions() != (frame.canvas_width, frame.canvas_height) {
        return Err(ConversionError::CompositeError(format!(
            "template is {}x{} but the bezel frame describes a {}x{} canvas",
            template.width(),
            template.height(),
            frame.canvas_width,
            frame.canvas_height
        )));
    }
    let screen = frame.inner_frame();
    if mask.dimensions() != (screen.width, screen.height) {
        return Err(ConversionError::CompositeError(format!(
            "mask is {}x{} but the inner frame is {}x{}",
            mask.width(),
            mask.height(),
            screen.width,
            screen.height
        )));
    }

    let mut canvas = allocate_canvas(frame.canvas_width, frame.canvas_height)?;
    let masked = apply_mask(screenshot, mask);
    overlay(&mut canvas, &masked, screen.x, screen.y);
    overlay(&mut canvas, template, 0, 0);

    debug!(
        width = canvas.width(),
        height = canvas.height(),
        screen_x = screen.x,
        screen_y = screen.y,
        "Composite drawn"
    );

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::bezel::{build_screen_mask, locate_bezel_frame};
    use crate::image_pipeline::fixtures::{BEZEL, RED, bezel_template, framed_template, solid};
    use crate::image_pipeline::raster::Rect;
    use image::Luma;

    fn run(screenshot: &RgbaImage, template: &RgbaImage) -> RgbaImage {
        let frame = locate_bezel_frame(template).unwrap();
        let mask = build_screen_mask(template, &frame).unwrap();
        composite(screenshot, template, &mask, &frame).unwrap()
    }

    #[test]
    fn test_blend_fast_paths() {
        let dst = Rgba([10, 20, 30, 255]);
        assert_eq!(blend_over(dst, CLEAR), dst);
        assert_eq!(blend_over(dst, RED), RED);
        assert_eq!(blend_over(CLEAR, Rgba([1, 2, 3, 4])), Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn test_blend_half_alpha_over_opaque() {
        let blended = blend_over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(blended[3], 255);
        assert_eq!(blended[0], 128);
    }

    #[test]
    fn test_apply_mask_crops_and_clears() {
        let screenshot = solid(3, 3, RED);
        let mask = GrayImage::from_fn(4, 2, |x, _| Luma([if x == 1 { 0 } else { 255 }]));

        let masked = apply_mask(&screenshot, &mask);

        assert_eq!(masked.dimensions(), (4, 2));
        assert_eq!(*masked.get_pixel(0, 0), RED);
        assert_eq!(*masked.get_pixel(1, 0), CLEAR);
        assert_eq!(*masked.get_pixel(2, 1), RED);
        // Column 3 lies beyond the screenshot.
        assert_eq!(*masked.get_pixel(3, 0), CLEAR);
    }

    #[test]
    fn test_end_to_end_red_screen() {
        let screen = Rect::new(51, 101, 898, 1798);
        let template = bezel_template(1000, 2000, Rect::new(0, 0, 1000, 2000), screen);
        let screenshot = solid(898, 1798, RED);

        let output = run(&screenshot, &template);

        assert_eq!(output.dimensions(), (1000, 2000));
        for (x, y, pixel) in output.enumerate_pixels() {
            if screen.contains(x, y) {
                assert_eq!(*pixel, RED, "({x}, {y}) should show the screenshot");
            } else {
                assert_eq!(pixel, template.get_pixel(x, y), "({x}, {y}) should be bezel");
            }
        }
    }

    #[test]
    fn test_output_matches_canvas_for_any_screenshot_size() {
        let template = framed_template(50, 70, 2, 4);

        for (w, h) in [(1, 1), (38, 58), (500, 20)] {
            let output = run(&solid(w, h, RED), &template);
            assert_eq!(output.dimensions(), (50, 70));
        }
    }

    #[test]
    fn test_oversized_screenshot_is_cropped() {
        let template = framed_template(50, 70, 2, 4);
        let screenshot = solid(200, 200, RED);

        let output = run(&screenshot, &template);

        // Transparent margin stays transparent, bezel stays bezel.
        assert_eq!(*output.get_pixel(0, 0), CLEAR);
        assert_eq!(*output.get_pixel(49, 69), CLEAR);
        assert_eq!(*output.get_pixel(3, 35), BEZEL);
        assert_eq!(*output.get_pixel(6, 6), RED);
        assert_eq!(*output.get_pixel(43, 63), RED);
    }

    #[test]
    fn test_antialiased_bezel_edge_is_opaque() {
        let mut template = framed_template(50, 70, 2, 4);
        let fringe = Rgba([40, 42, 44, 128]);
        template.put_pixel(6, 20, fringe);
        let screenshot = solid(38, 58, RED);

        let output = run(&screenshot, &template);

        let edge = output.get_pixel(6, 20);
        assert_eq!(edge[3], 255);
        assert_eq!(*edge, blend_over(RED, fringe));
        assert!(edge[0] > 40 && edge[0] < 255);
    }

    #[test]
    fn test_composite_is_deterministic() {
        let template = framed_template(64, 96, 3, 7);
        let screenshot = RgbaImage::from_fn(50, 82, |x, y| Rgba([x as u8, y as u8, 7, 255]));

        let first = run(&screenshot, &template);
        let second = run(&screenshot, &template);

        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_mismatched_mask_is_rejected() {
        let template = framed_template(50, 70, 2, 4);
        let frame = locate_bezel_frame(&template).unwrap();
        let mask = GrayImage::new(3, 3);

        let result = composite(&solid(10, 10, RED), &template, &mask, &frame);

        assert!(matches!(result, Err(ConversionError::CompositeError(_))));
    }
}
