use image::RgbaImage;
use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::image_pipeline::{
    bezel::{build_screen_mask, locate_bezel_frame},
    common::error::{ConversionError, Result},
    compose::composite,
    png::{CompositeConfig, PngWriter, StandardPngWriter},
    raster::{ImageRasterReader, RasterImageData, RasterReader},
};

pub struct BezelCompositePipeline<R: RasterReader, W: PngWriter> {
    reader: R,
    writer: W,
    config: CompositeConfig,
}

impl BezelCompositePipeline<ImageRasterReader, StandardPngWriter> {
    pub fn new(config: CompositeConfig) -> Self {
        Self {
            reader: ImageRasterReader,
            writer: StandardPngWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: PngWriter> BezelCompositePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: CompositeConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(width, height, max, "Image dimensions exceed maximum");
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn check_template_alpha(&self, template: &RasterImageData) -> Result<()> {
        if self.config.require_template_alpha && !template.has_alpha {
            return Err(ConversionError::MissingAlpha(format!(
                "{}x{} bezel template cannot carry a transparent screen",
                template.width(),
                template.height()
            )));
        }
        Ok(())
    }

    /// Decodes a screenshot.
    pub fn read_screenshot(&self, data: &[u8]) -> Result<RgbaImage> {
        let _span = tracing::info_span!("decode_screenshot", input_size = data.len()).entered();
        Ok(self.reader.read_raster(data)?.pixels)
    }

    /// Decodes a bezel template, rejecting sources without an alpha channel
    /// unless the config allows them.
    pub fn read_template(&self, data: &[u8]) -> Result<RgbaImage> {
        let _span = tracing::info_span!("decode_template", input_size = data.len()).entered();
        let template = self.reader.read_raster(data)?;
        self.check_template_alpha(&template)?;
        Ok(template.pixels)
    }

    /// Reads and decodes a bezel template file.
    pub fn read_template_file<P: AsRef<Path>>(&self, path: P) -> Result<RgbaImage> {
        let data = read_input_file(path.as_ref())?;
        self.read_template(&data)
    }

    /// Locates the screen in `template`, masks `screenshot` to it, and draws
    /// the template on top.
    #[instrument(skip_all, fields(
        screenshot = ?screenshot.dimensions(),
        template = ?template.dimensions()
    ))]
    pub fn composite(&self, screenshot: &RgbaImage, template: &RgbaImage) -> Result<RgbaImage> {
        {
            let _span = tracing::info_span!("validate_dimensions").entered();
            self.validate_dimensions(screenshot.width(), screenshot.height())?;
            self.validate_dimensions(template.width(), template.height())?;
        }

        let frame = {
            let _span = tracing::info_span!("locate_frame").entered();
            locate_bezel_frame(template)?
        };

        let screen = frame.inner_frame();
        if screenshot.dimensions() != (screen.width, screen.height) {
            warn!(
                screenshot_width = screenshot.width(),
                screenshot_height = screenshot.height(),
                screen_width = screen.width,
                screen_height = screen.height,
                "Screenshot does not match the bezel screen; it will be cropped"
            );
        }

        let mask = {
            let _span = tracing::info_span!("build_mask").entered();
            build_screen_mask(template, &frame)?
        };

        let output = {
            let _span = tracing::info_span!("composite").entered();
            composite(screenshot, template, &mask, &frame)?
        };

        info!(
            width = output.width(),
            height = output.height(),
            "Composite complete"
        );
        Ok(output)
    }

    /// Encodes `image` to an in-memory PNG.
    pub fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        let _span = tracing::info_span!("encode_png").entered();
        let mut buffer = Vec::new();
        self.writer.write_png(image, &mut buffer, &self.config)?;
        Ok(buffer)
    }

    #[instrument(skip_all, fields(
        screenshot_size = screenshot_data.len(),
        template_size = template_data.len()
    ))]
    pub fn convert(
        &self,
        screenshot_data: &[u8],
        template_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<()> {
        info!("Starting bezel composite");

        let screenshot = self.read_screenshot(screenshot_data)?;
        let template = self.read_template(template_data)?;
        let image = self.composite(&screenshot, &template)?;

        let _span = tracing::info_span!("encode_png").entered();
        self.writer.write_png(&image, output, &self.config)
    }

    /// Composites one screenshot file into one output file.
    ///
    /// The PNG is fully encoded in memory and then staged next to
    /// `output_path`; the file at `output_path` is only replaced once the
    /// whole PNG is on disk, so a failure never leaves a partial file.
    #[instrument(skip(self, screenshot_path, template_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        screenshot_path: P,
        template_path: Q,
        output_path: O,
    ) -> Result<()> {
        let screenshot_path = screenshot_path.as_ref();
        let template_path = template_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            screenshot = %screenshot_path.display(),
            template = %template_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let screenshot = self.read_screenshot(&read_input_file(screenshot_path)?)?;
        let template = self.read_template_file(template_path)?;
        let image = self.composite(&screenshot, &template)?;
        let encoded = self.encode_png(&image)?;

        write_output_file(output_path, &encoded)
    }

    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CompositeConfig) {
        self.config = config;
    }
}

pub(crate) fn read_input_file(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file").entered();
    std::fs::read(path).map_err(|e| {
        ConversionError::InputReadError(format!("{}: {}", path.display(), e))
    })
}

fn output_error(path: &Path, e: std::io::Error) -> ConversionError {
    ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
}

pub(crate) fn write_output_file(path: &Path, data: &[u8]) -> Result<()> {
    write_output_with(path, |file| file.write_all(data))
}

/// Staged files are private to the owner; the output keeps the permissions of
/// the file it replaces, or gets the usual 0644 when new.
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        #[cfg(unix)]
        Err(_) => {
            use std::os::unix::fs::PermissionsExt;
            Some(std::fs::Permissions::from_mode(0o644))
        }
        #[cfg(not(unix))]
        Err(_) => None,
    }
}

/// Writes through a temporary file in the destination directory and renames
/// it over `path` only once `write` succeeds. On failure the temporary file is
/// removed and whatever was at `path` is left as it was.
pub(crate) fn write_output_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> std::io::Result<()>,
{
    let _span = tracing::info_span!("write_output_file").entered();

    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(parent).map_err(|e| output_error(path, e))?;

    write(staged.as_file_mut()).map_err(|e| output_error(path, e))?;
    staged.as_file_mut().flush().map_err(|e| output_error(path, e))?;
    if let Some(permissions) = output_permissions(path) {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| output_error(path, e))?;
    }

    staged.persist(path).map_err(|e| output_error(path, e.error))?;
    Ok(())
}
