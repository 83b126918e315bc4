//! Composite and PNG output configuration types

/// PNG compression levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    /// Fastest encoding, largest file
    Fast,
    /// Balanced (default)
    Default,
    /// Smallest file, slowest encoding
    Best,
}

/// PNG row filtering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngFilter {
    /// No filtering (fastest)
    None,
    /// Per-row heuristic choice of filter (default)
    Adaptive,
}

/// Configuration for bezel compositing
#[derive(Debug, Clone)]
pub struct CompositeConfig {
    /// Compression level for the written PNG
    pub compression: PngCompression,
    /// Row filter for the written PNG
    pub filter: PngFilter,
    /// Whether to validate image dimensions before compositing
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<u32>,
    /// Reject templates whose source has no alpha channel
    pub require_template_alpha: bool,
    /// Upper bound on batch inputs processed at once; `None` uses the global pool
    pub max_parallel: Option<usize>,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            compression: PngCompression::Default,
            filter: PngFilter::Adaptive,
            validate_dimensions: true,
            max_dimension: Some(16384),
            require_template_alpha: true,
            max_parallel: None,
        }
    }
}

impl CompositeConfig {
    pub fn builder() -> CompositeConfigBuilder {
        CompositeConfigBuilder::default()
    }
}

/// Builder for CompositeConfig
#[derive(Default)]
pub struct CompositeConfigBuilder {
    compression: Option<PngCompression>,
    filter: Option<PngFilter>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    require_template_alpha: Option<bool>,
    max_parallel: Option<Option<usize>>,
}

impl CompositeConfigBuilder {
    pub fn compression(mut self, compression: PngCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn filter(mut self, filter: PngFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn require_template_alpha(mut self, require: bool) -> Self {
        self.require_template_alpha = Some(require);
        self
    }

    pub fn max_parallel(mut self, max: Option<usize>) -> Self {
        self.max_parallel = Some(max);
        self
    }

    pub fn build(self) -> CompositeConfig {
        let default = CompositeConfig::default();
        CompositeConfig {
            compression: self.compression.unwrap_or(default.compression),
            filter: self.filter.unwrap_or(default.filter),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            require_template_alpha: self.require_template_alpha.unwrap_or(default.require_template_alpha),
            max_parallel: self.max_parallel.unwrap_or(default.max_parallel),
        }
    }
}
