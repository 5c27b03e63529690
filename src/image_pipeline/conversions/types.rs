//! Conversion configuration types

use crate::image_pipeline::caps::{CfaOrder, Framerate};
use crate::image_pipeline::negotiation::NegotiatedFormat;

/// Configuration for GRAY8 to Bayer conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Requested Bayer `format` tag, matched exactly during negotiation
    pub format: String,
    /// Frame rate advertised on both sides; `None` leaves it out of the caps
    pub framerate: Option<Framerate>,
    /// Whether to validate frame dimensions before negotiating
    pub validate_dimensions: bool,
    /// Upper bound on width and height when validating
    pub max_dimension: Option<u32>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            format: CfaOrder::Rggb.as_str().to_string(),
            framerate: None,
            validate_dimensions: true,
            max_dimension: Some(50000),
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    dimensions: Option<(u32, u32)>,
    format: Option<String>,
    framerate: Option<Option<Framerate>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl ConversionConfigBuilder {
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn cfa_order(self, order: CfaOrder) -> Self {
        self.format(order.as_str())
    }

    pub fn framerate(mut self, framerate: Option<Framerate>) -> Self {
        self.framerate = Some(framerate);
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

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        let (width, height) = self.dimensions.unwrap_or((default.width, default.height));
        ConversionConfig {
            width,
            height,
            format: self.format.unwrap_or(default.format),
            framerate: self.framerate.unwrap_or(default.framerate),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

/// What a conversion run did
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// The format both sides agreed on
    pub format: NegotiatedFormat,
    /// Frames read from the input
    pub frames_in: usize,
    /// Frames written to the output
    pub frames_out: usize,
    /// Frames skipped because a buffer could not be mapped
    pub frames_dropped: usize,
}

impl ConversionReport {
    pub fn new(format: NegotiatedFormat) -> Self {
        Self {
            format,
            frames_in: 0,
            frames_out: 0,
            frames_dropped: 0,
        }
    }
}
