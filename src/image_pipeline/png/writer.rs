use std::io::Write;
use image::RgbaImage;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::png::types::CompositeConfig;

pub trait PngWriter {
    fn write_png(&self, image: &RgbaImage, output: &mut dyn Write, config: &CompositeConfig) -> Result<()>;
}
