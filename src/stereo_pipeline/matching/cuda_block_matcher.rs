use cudarc::driver::safe::*;
use cudarc::nvrtc::Ptx;
use std::sync::Arc;
use tracing::info;

use crate::stereo_pipeline::common::error::{Result, StereoError};
use crate::stereo_pipeline::image::GrayImage;
use crate::stereo_pipeline::matching::matcher::StereoMatcher;
use crate::stereo_pipeline::matching::types::{BlockMatcherConfig, RawDisparity};

/// CUDA SAD block matcher, whole-pixel disparities (scale 1)
pub struct CudaBlockMatcher {
    stream: Arc<CudaStream>,
    kernel: CudaFunction,
    config: BlockMatcherConfig,
}

impl CudaBlockMatcher {
    /// Initialize CUDA context and load kernel
    pub fn new(config: BlockMatcherConfig) -> Result<Self> {
        config.validate()?;
        Self::load(config).map_err(|e| StereoError::Cuda(e.to_string()))
    }

    fn load(config: BlockMatcherConfig) -> anyhow::Result<Self> {
        // Include compiled PTX from build.rs
        let ptx = include_str!(concat!(env!("OUT_DIR"), "/stereo_bm_sad.ptx"));
        let kernel_name = "stereo_bm_sad";

        let ctx = CudaContext::new(0)?;
        let stream = ctx.default_stream();
        let module = ctx.load_module(Ptx::from_src(ptx))?;
        let kernel = module.load_function(kernel_name)?;

        Ok(Self {
            stream,
            kernel,
            config,
        })
    }

    fn run(&self, left: &GrayImage, right: &GrayImage) -> anyhow::Result<Vec<i16>> {
        // Copy both images to GPU
        let mut d_left = self.stream.clone_htod(&left.data)?;
        let mut d_right = self.stream.clone_htod(&right.data)?;

        let num_pixels = left.width * left.height;
        let mut d_disparity = self.stream.alloc_zeros::<i16>(num_pixels)?;

        // Kernel arguments
        let width = left.width as i32;
        let height = left.height as i32;
        let half_window = (self.config.correlation_window_size / 2) as i32;
        let min_disparity = self.config.min_disparity;
        let disparity_range = self.config.disparity_range;
        let texture_threshold = self.config.texture_threshold;
        let mut launch_args = self.stream.launch_builder(&self.kernel);
        launch_args.arg(&mut d_left);
        launch_args.arg(&mut d_right);
        launch_args.arg(&mut d_disparity);
        launch_args.arg(&width);
        launch_args.arg(&height);
        launch_args.arg(&half_window);
        launch_args.arg(&min_disparity);
        launch_args.arg(&disparity_range);
        launch_args.arg(&texture_threshold);

        // Configure threads and blocks
        let threads = (16, 16, 1);
        let blocks = (left.width.div_ceil(16), left.height.div_ceil(16), 1);
        let cfg = LaunchConfig {
            grid_dim: (blocks.0 as u32, blocks.1 as u32, blocks.2 as u32),
            block_dim: threads,
            shared_mem_bytes: 0,
        };

        // Launch kernel
        unsafe { launch_args.launch(cfg)? };

        // Copy back from GPU
        Ok(self.stream.clone_dtoh(&d_disparity)?)
    }
}

impl StereoMatcher for CudaBlockMatcher {
    fn disparity_scale(&self) -> u32 {
        1
    }

    fn compute(&self, left: &GrayImage, right: &GrayImage, output: &mut RawDisparity) -> Result<()> {
        if left.dimensions() != right.dimensions() {
            return Err(StereoError::DimensionMismatch {
                expected: left.dimensions(),
                actual: right.dimensions(),
            });
        }
        info!("Starting CUDA block matching for image {}x{}", left.width, left.height);

        output.resize(left.width, left.height);
        if left.width == 0 || left.height == 0 {
            return Ok(());
        }
        let disparity = self
            .run(left, right)
            .map_err(|e| StereoError::Matching(format!("CUDA kernel failed: {}", e)))?;
        output.data.copy_from_slice(&disparity);
        Ok(())
    }
}
