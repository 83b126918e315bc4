use thiserror::Error;

use crate::image_pipeline::conversions::Orientation;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode PNG image: {0}")]
    EncodeError(String),

    #[error("Image has no alpha channel: {0}")]
    MissingAlpha(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Could not determine bezel frame: {0}")]
    FrameDetectionError(String),

    #[error("Failed to build screen mask: {0}")]
    MaskConstructionError(String),

    #[error("Failed to composite image: {0}")]
    CompositeError(String),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("No bezel template for {0:?} orientation")]
    MissingTemplate(Orientation),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
