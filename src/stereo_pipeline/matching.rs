//! Stereo matching engines producing fixed-point disparity

#[cfg(jetson_cuda)]
pub mod cuda_block_matcher;
pub mod cpu_block_matcher;
mod matcher;
pub mod types;

// Fallback when NOT on Jetson
#[cfg(not(jetson_cuda))]
pub struct CudaBlockMatcher;

#[cfg(not(jetson_cuda))]
impl CudaBlockMatcher {
    pub fn new(_config: BlockMatcherConfig) -> Result<Self> {
        Err(StereoError::Cuda(
            "CUDA block matcher is not available on this platform".to_string(),
        ))
    }
}

#[cfg(not(jetson_cuda))]
impl StereoMatcher for CudaBlockMatcher {
    fn disparity_scale(&self) -> u32 {
        1
    }

    fn compute(&self, _left: &GrayImage, _right: &GrayImage, _output: &mut RawDisparity) -> Result<()> {
        Err(StereoError::Matching(
            "CUDA block matcher is not available on this platform".to_string(),
        ))
    }
}

#[cfg(jetson_cuda)]
pub use cuda_block_matcher::CudaBlockMatcher;
pub use cpu_block_matcher::CpuBlockMatcher;
pub use matcher::StereoMatcher;
pub use types::{BlockMatcherConfig, RawDisparity};

#[cfg(not(jetson_cuda))]
use crate::stereo_pipeline::{
    common::error::{Result, StereoError},
    image::GrayImage,
};
