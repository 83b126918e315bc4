//! PNG writing module
//!
//! This module encodes composited images as PNG and holds the configuration
//! shared by the composite pipeline.

mod writer;
mod standard_png_writer;
pub mod types;

pub use writer::PngWriter;
pub use standard_png_writer::StandardPngWriter;
pub use types::{PngCompression, PngFilter, CompositeConfig, CompositeConfigBuilder};
