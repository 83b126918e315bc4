//! Bezel frame types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raster::Rect;

/// Inclusive pixel range along a scan line where alpha changes between
/// transparent and opaque.
///
/// `start` is where the scan first enters the bezel, `end` is the last bezel
/// pixel before the screen. For a bezel that reaches the canvas edge the two
/// can be reported out of order; only `end` of a leading band and `start` of a
/// trailing band feed the inner frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub start: u32,
    pub end: u32,
}

impl Band {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Location of the screen cutout inside a bezel template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BezelFrame {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub top: Band,
    pub bottom: Band,
    pub left: Band,
    pub right: Band,
}

impl BezelFrame {
    /// Builds a frame, rejecting band combinations that leave no screen area.
    pub fn new(
        canvas_width: u32,
        canvas_height: u32,
        top: Band,
        bottom: Band,
        left: Band,
        right: Band,
    ) -> Result<Self> {
        if top.end >= bottom.start || left.end >= right.start {
            return Err(ConversionError::FrameDetectionError(format!(
                "bands overlap (top ends at {}, bottom starts at {}, left ends at {}, right starts at {})",
                top.end, bottom.start, left.end, right.start
            )));
        }
        if bottom.start - top.end < 2 || right.start - left.end < 2 {
            return Err(ConversionError::FrameDetectionError(
                "screen region has zero area".to_string(),
            ));
        }
        if right.start >= canvas_width || bottom.start >= canvas_height {
            return Err(ConversionError::FrameDetectionError(format!(
                "bands exceed {}x{} canvas",
                canvas_width, canvas_height
            )));
        }

        Ok(Self {
            canvas_width,
            canvas_height,
            top,
            bottom,
            left,
            right,
        })
    }

    /// The rectangle strictly inside all four transition bands.
    pub fn inner_frame(&self) -> Rect {
        Rect {
            x: self.left.end + 1,
            y: self.top.end + 1,
            width: self.right.start - self.left.end - 1,
            height: self.bottom.start - self.top.end - 1,
        }
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0, 0, self.canvas_width, self.canvas_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_frame_sits_inside_bands() {
        let frame = BezelFrame::new(
            1000,
            2000,
            Band::new(10, 100),
            Band::new(1899, 1990),
            Band::new(10, 50),
            Band::new(949, 990),
        )
        .unwrap();

        assert_eq!(frame.inner_frame(), Rect::new(51, 101, 898, 1798));
        assert_eq!(frame.canvas_rect(), Rect::new(0, 0, 1000, 2000));
    }

    #[test]
    fn test_overlapping_bands_are_rejected() {
        let result = BezelFrame::new(
            100,
            100,
            Band::new(0, 60),
            Band::new(40, 99),
            Band::new(0, 10),
            Band::new(90, 99),
        );
        assert!(matches!(result, Err(ConversionError::FrameDetectionError(_))));
    }

    #[test]
    fn test_adjacent_bands_are_zero_area() {
        let result = BezelFrame::new(
            100,
            100,
            Band::new(0, 10),
            Band::new(90, 99),
            Band::new(0, 49),
            Band::new(50, 99),
        );
        assert!(matches!(result, Err(ConversionError::FrameDetectionError(_))));
    }
}
