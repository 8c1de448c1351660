//! Types for stereo matching

use crate::stereo_pipeline::common::error::{Result, StereoError};

/// Signed fixed-point disparity buffer written by a matcher.
///
/// Reused across calls; every call overwrites it completely before it is read.
#[derive(Debug, Clone, Default)]
pub struct RawDisparity {
    /// Width of the buffer in pixels
    pub width: usize,
    /// Height of the buffer in pixels
    pub height: usize,
    /// Fixed-point values, row-major
    pub data: Vec<i16>,
}

impl RawDisparity {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<i16>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self { width, height, data }
    }

    /// Reshapes the buffer, keeping the allocation when possible
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.resize(width * height, 0);
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i16 {
        self.data[row * self.width + col]
    }
}

/// Block matching parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatcherConfig {
    /// Clamp applied to the x-Sobel prefiltered intensities
    pub prefilter_cap: i32,
    /// Side of the square SAD window, odd
    pub correlation_window_size: usize,
    /// Smallest disparity searched
    pub min_disparity: i32,
    /// Number of disparities searched, a positive multiple of 16
    pub disparity_range: i32,
    /// Minimum window texture for a match to be accepted
    pub texture_threshold: i32,
    /// Margin in percent by which the best cost must beat every other candidate
    pub uniqueness_ratio: f32,
}

impl Default for BlockMatcherConfig {
    fn default() -> Self {
        Self {
            prefilter_cap: 31,
            correlation_window_size: 15,
            min_disparity: 0,
            disparity_range: 64,
            texture_threshold: 10,
            uniqueness_ratio: 15.0,
        }
    }
}

impl BlockMatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=63).contains(&self.prefilter_cap) {
            return Err(StereoError::InvalidConfig(format!(
                "prefilter_cap must be in [1, 63], got {}",
                self.prefilter_cap
            )));
        }
        if self.correlation_window_size % 2 == 0 || !(5..=255).contains(&self.correlation_window_size) {
            return Err(StereoError::InvalidConfig(format!(
                "correlation_window_size must be odd and in [5, 255], got {}",
                self.correlation_window_size
            )));
        }
        if self.disparity_range <= 0 || self.disparity_range % 16 != 0 {
            return Err(StereoError::InvalidConfig(format!(
                "disparity_range must be a positive multiple of 16, got {}",
                self.disparity_range
            )));
        }
        // Raw output is 1/16 pixel in an i16, including the `min_disparity - 1` marker
        let lowest = (self.min_disparity as i64 - 1) * 16;
        let highest = (self.min_disparity as i64 + self.disparity_range as i64) * 16;
        if lowest < i16::MIN as i64 || highest > i16::MAX as i64 {
            return Err(StereoError::InvalidConfig(format!(
                "disparities [{}, {}] do not fit the 1/16 pixel i16 output",
                self.min_disparity - 1,
                self.min_disparity as i64 + self.disparity_range as i64
            )));
        }
        if self.texture_threshold < 0 {
            return Err(StereoError::InvalidConfig(format!(
                "texture_threshold must be non-negative, got {}",
                self.texture_threshold
            )));
        }
        if self.uniqueness_ratio < 0.0 {
            return Err(StereoError::InvalidConfig(format!(
                "uniqueness_ratio must be non-negative, got {}",
                self.uniqueness_ratio
            )));
        }
        Ok(())
    }
}
