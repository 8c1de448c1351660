use crate::stereo_pipeline::common::error::Result;
use crate::stereo_pipeline::image::GrayImage;
use crate::stereo_pipeline::matching::types::RawDisparity;

pub trait StereoMatcher {
    /// Fixed-point subdivisions per disparity pixel: a raw value `r` means `r / scale` pixels.
    fn disparity_scale(&self) -> u32;

    /// Matches two rectified images of equal size, overwriting `output` and
    /// resizing it to the input dimensions.
    fn compute(&self, left: &GrayImage, right: &GrayImage, output: &mut RawDisparity) -> Result<()>;
}
