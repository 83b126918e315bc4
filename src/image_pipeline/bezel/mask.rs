//! Screen mask construction.
//!
//! Bezel templates carry antialiased edges and non-rectangular cutouts such
//! as a camera notch. Before the mask is extracted, each row of a private copy
//! of the template is snapped to a clean silhouette: the outer fringe becomes
//! opaque black, and everything between the first and last transparent pixel
//! becomes fully transparent.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use tracing::debug;

use crate::image_pipeline::bezel::scan::{ScanDirection, find_index};
use crate::image_pipeline::bezel::types::BezelFrame;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raster::{ALPHA_OPAQUE, ALPHA_TRANSPARENT, alpha_at};

const OPAQUE_BLACK: Rgba<u8> = Rgba([0, 0, 0, ALPHA_OPAQUE]);
const TRANSPARENT_BLACK: Rgba<u8> = Rgba([0, 0, 0, ALPHA_TRANSPARENT]);

/// Mask value where the screenshot shows through.
pub const MASK_VISIBLE: u8 = 255;
/// Mask value where the bezel hides the screenshot.
pub const MASK_HIDDEN: u8 = 0;

fn clean_row(template: &mut RgbaImage, y: u32) {
    let width = template.width();

    // A row with no fully opaque pixel is filled entirely.
    let first_opaque = find_index(width, ScanDirection::Forward, |x| {
        alpha_at(template, x, y) == ALPHA_OPAQUE
    });
    for x in 0..first_opaque.unwrap_or(width) {
        template.put_pixel(x, y, OPAQUE_BLACK);
    }

    if first_opaque.is_some() {
        let last_opaque = find_index(width, ScanDirection::Backward, |x| {
            alpha_at(template, x, y) == ALPHA_OPAQUE
        });
        if let Some(last_opaque) = last_opaque {
            for x in last_opaque..width {
                template.put_pixel(x, y, OPAQUE_BLACK);
            }
        }
    }

    let first_transparent = find_index(width, ScanDirection::Forward, |x| {
        alpha_at(template, x, y) == ALPHA_TRANSPARENT
    });
    let last_transparent = find_index(width, ScanDirection::Backward, |x| {
        alpha_at(template, x, y) == ALPHA_TRANSPARENT
    });
    if let (Some(first), Some(last)) = (first_transparent, last_transparent) {
        for x in first..last {
            template.put_pixel(x, y, TRANSPARENT_BLACK);
        }
    }
}

/// Snaps every row of `template` to a binary silhouette, in place.
pub fn clean_template(template: &mut RgbaImage) {
    for y in 0..template.height() {
        clean_row(template, y);
    }
}

/// Builds the screenshot mask for `frame`, sized to its inner frame.
///
/// The caller's template is left untouched; cleaning happens on a copy. The
/// mask is [`MASK_HIDDEN`] where the cleaned template is fully opaque and
/// [`MASK_VISIBLE`] everywhere else. Semi-transparent edge pixels that survive
/// cleaning therefore keep the screenshot beneath them, and the template drawn
/// on top blends into it instead of leaving a see-through fringe.
pub fn build_screen_mask(template: &RgbaImage, frame: &BezelFrame) -> Result<GrayImage> {
    if template.dimensions() != (frame.canvas_width, frame.canvas_height) {
        return Err(ConversionError::MaskConstructionError(format!(
            "template is {}x{} but the bezel frame was located on a {}x{} canvas",
            template.width(),
            template.height(),
            frame.canvas_width,
            frame.canvas_height
        )));
    }

    let screen = frame.inner_frame();
    let mask_len = (screen.width as usize)
        .checked_mul(screen.height as usize)
        .ok_or_else(|| {
            ConversionError::MaskConstructionError(format!(
                "mask of {}x{} is too large",
                screen.width, screen.height
            ))
        })?;

    let mut working = template.clone();
    clean_template(&mut working);

    let mut samples = Vec::with_capacity(mask_len);
    for y in screen.y..screen.bottom() {
        for x in screen.x..screen.right() {
            let visible = alpha_at(&working, x, y) != ALPHA_OPAQUE;
            samples.push(if visible { MASK_VISIBLE } else { MASK_HIDDEN });
        }
    }

    let mask = GrayImage::from_raw(screen.width, screen.height, samples).ok_or_else(|| {
        ConversionError::MaskConstructionError("mask buffer does not match frame size".to_string())
    })?;

    debug!(
        width = mask.width(),
        height = mask.height(),
        visible = mask.pixels().filter(|Luma([v])| *v == MASK_VISIBLE).count(),
        "Screen mask built"
    );

    Ok(mask)
}
