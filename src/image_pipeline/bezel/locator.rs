//! Bezel frame detection by midline alpha scans.
//!
//! Only the middle row and the middle column are inspected. Screens are
//! assumed axis-aligned and crossing both midlines; templates whose cutout is
//! off-center or concave across a midline are misdetected.

use image::RgbaImage;
use tracing::debug;

use crate::image_pipeline::bezel::scan::{ScanDirection, find_transition};
use crate::image_pipeline::bezel::types::{Band, BezelFrame};
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raster::{ALPHA_TRANSPARENT, alpha_at};

/// Finds the transition band at one end of a scan line.
///
/// `Forward` yields the leading band (top or left), `Backward` the trailing
/// band (bottom or right).
fn locate_band<F>(len: u32, direction: ScanDirection, alpha: F, edge: &str) -> Result<Band>
where
    F: Fn(u32) -> u8,
{
    let transparent = |i: u32| alpha(i) == ALPHA_TRANSPARENT;

    let start = find_transition(len, direction, |a, b| transparent(a) && !transparent(b))
        .map(|(_, entered)| entered)
        .ok_or_else(|| {
            ConversionError::FrameDetectionError(format!("no transparent-to-opaque edge on the {edge}"))
        })?;
    let end = find_transition(len, direction, |a, b| !transparent(a) && transparent(b))
        .map(|(left, _)| left)
        .ok_or_else(|| {
            ConversionError::FrameDetectionError(format!("no opaque-to-transparent edge on the {edge}"))
        })?;

    Ok(Band::new(start, end))
}

/// Locates the transparent screen region of a bezel template.
///
/// Fails with [`ConversionError::FrameDetectionError`] when either midline
/// lacks a transparent/opaque transition on each side, or when the bands
/// found leave no screen area.
pub fn locate_bezel_frame(template: &RgbaImage) -> Result<BezelFrame> {
    let (width, height) = template.dimensions();
    if width < 2 || height < 2 {
        return Err(ConversionError::FrameDetectionError(format!(
            "template is too small ({}x{})",
            width, height
        )));
    }

    let middle_x = width / 2;
    let middle_y = height / 2;
    let column = |y: u32| alpha_at(template, middle_x, y);
    let row = |x: u32| alpha_at(template, x, middle_y);

    let top = locate_band(height, ScanDirection::Forward, column, "top")?;
    let bottom = locate_band(height, ScanDirection::Backward, column, "bottom")?;
    let left = locate_band(width, ScanDirection::Forward, row, "left")?;
    let right = locate_band(width, ScanDirection::Backward, row, "right")?;

    debug!(?top, ?bottom, ?left, ?right, "Bezel bands located");

    BezelFrame::new(width, height, top, bottom, left, right)
}
