//! Disparity image types

/// Lower bound of the advertised valid disparity window.
pub const MIN_DISPARITY: f32 = 0.0;
/// Upper bound of the advertised valid disparity window. Fixed to the block
/// matcher's default search window, not the configured range.
pub const MAX_DISPARITY: f32 = 63.0;

/// Floating-point disparity image with the stereo parameters needed to turn
/// disparity into depth (`z = focal_length * baseline / d`)
#[derive(Debug, Clone, PartialEq)]
pub struct DisparityImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Row stride in bytes
    pub step: usize,
    /// Disparity in pixels, row-major
    pub data: Vec<f32>,
    /// Focal length of the right camera in pixels
    pub focal_length: f32,
    /// Stereo baseline
    pub baseline: f32,
    /// Lower bound of the valid disparity window, in pixels
    pub min_disparity: f32,
    /// Upper bound of the valid disparity window, in pixels
    pub max_disparity: f32,
    /// Smallest representable disparity step of the source encoding
    pub delta_d: f32,
}

impl DisparityImage {
    pub const ENCODING: &'static str = "32FC1";

    pub fn new(
        width: usize,
        height: usize,
        data: Vec<f32>,
        focal_length: f32,
        baseline: f32,
        delta_d: f32,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            step: width * std::mem::size_of::<f32>(),
            data,
            focal_length,
            baseline,
            min_disparity: MIN_DISPARITY,
            max_disparity: MAX_DISPARITY,
            delta_d,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    pub fn encoding(&self) -> &'static str {
        Self::ENCODING
    }

    /// Pixel buffer as host-order bytes, `step * height` long
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
