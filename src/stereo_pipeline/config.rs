//! Stereo pipeline configuration types

use crate::stereo_pipeline::matching::BlockMatcherConfig;

/// Configuration for the stereo processor
#[derive(Debug, Clone)]
pub struct StereoConfig {
    /// Parameters handed to the block matcher
    pub matcher: BlockMatcherConfig,
    /// Whether to reject empty or mismatched rectified pairs before matching
    pub validate_dimensions: bool,
}

impl Default for StereoConfig {
    fn default() -> Self {
        Self {
            matcher: BlockMatcherConfig::default(),
            validate_dimensions: true,
        }
    }
}

impl StereoConfig {
    pub fn builder() -> StereoConfigBuilder {
        StereoConfigBuilder::default()
    }
}

/// Builder for StereoConfig
#[derive(Default)]
pub struct StereoConfigBuilder {
    matcher: Option<BlockMatcherConfig>,
    validate_dimensions: Option<bool>,
}

impl StereoConfigBuilder {
    pub fn matcher(mut self, matcher: BlockMatcherConfig) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> StereoConfig {
        let default = StereoConfig::default();
        StereoConfig {
            matcher: self.matcher.unwrap_or(default.matcher),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
