//! Image processing pipeline module
//!
//! This module places a screenshot inside a device bezel template. It is split
//! into raster reading, bezel frame detection and masking, compositing, PNG
//! writing, and the conversions that orchestrate them.

pub mod raster;
pub mod bezel;
pub mod compose;
pub mod png;
pub mod conversions;
pub mod common;

#[cfg(test)]
pub(crate) mod fixtures;

pub use common::{
    ConversionError,
    Result,
};

pub use raster::{
    RasterImageData,
    RasterReader,
    ImageRasterReader,
    Rect,
};

pub use bezel::{
    Band,
    BezelFrame,
    locate_bezel_frame,
    build_screen_mask,
};

pub use compose::composite;

pub use png::{
    PngCompression,
    PngFilter,
    CompositeConfig,
    CompositeConfigBuilder,
    PngWriter,
    StandardPngWriter,
};

pub use conversions::{
    BatchReport,
    BezelCompositePipeline,
    BezelSet,
    Destination,
    Orientation,
};
