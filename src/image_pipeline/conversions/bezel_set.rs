use image::RgbaImage;
use tracing::warn;

use crate::image_pipeline::common::error::{ConversionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait when strictly taller than wide, landscape otherwise.
    pub fn of(width: u32, height: u32) -> Self {
        if width < height {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    pub fn of_image(image: &RgbaImage) -> Self {
        Self::of(image.width(), image.height())
    }
}

/// Decoded bezel templates, at most one per orientation.
///
/// Templates are filed under their own orientation, and each screenshot is
/// matched with the template of the same orientation.
#[derive(Debug, Clone, Default)]
pub struct BezelSet {
    portrait: Option<RgbaImage>,
    landscape: Option<RgbaImage>,
}

impl BezelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `template`, replacing any earlier template of the same orientation.
    pub fn insert(&mut self, template: RgbaImage) -> Orientation {
        let orientation = Orientation::of_image(&template);
        let slot = match orientation {
            Orientation::Portrait => &mut self.portrait,
            Orientation::Landscape => &mut self.landscape,
        };
        if slot.replace(template).is_some() {
            warn!(?orientation, "Replacing bezel template");
        }
        orientation
    }

    pub fn with_template(mut self, template: RgbaImage) -> Self {
        self.insert(template);
        self
    }

    pub fn template_for(&self, orientation: Orientation) -> Result<&RgbaImage> {
        let template = match orientation {
            Orientation::Portrait => self.portrait.as_ref(),
            Orientation::Landscape => self.landscape.as_ref(),
        };
        template.ok_or(ConversionError::MissingTemplate(orientation))
    }

    pub fn is_empty(&self) -> bool {
        self.portrait.is_none() && self.landscape.is_none()
    }
}
