//! SAD block matcher running on the CPU.
//!
//! Both images are x-Sobel prefiltered and clamped to `[-cap, cap]`, then every
//! left pixel is compared against the right image along its scanline over the
//! configured disparity range. Matches are rejected for low texture or when
//! another candidate comes too close to the best cost, and accepted matches are
//! refined to 1/16 pixel with a parabola through the neighbouring costs.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::stereo_pipeline::common::error::{Result, StereoError};
use crate::stereo_pipeline::image::GrayImage;
use crate::stereo_pipeline::matching::matcher::StereoMatcher;
use crate::stereo_pipeline::matching::types::{BlockMatcherConfig, RawDisparity};

/// Sub-pixel resolution of the output: one raw unit is 1/16 pixel.
pub const DISPARITY_SCALE: u32 = 16;

pub struct CpuBlockMatcher {
    config: BlockMatcherConfig,
}

impl CpuBlockMatcher {
    pub fn new(config: BlockMatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BlockMatcherConfig {
        &self.config
    }

    /// Raw value written where no disparity could be found
    pub fn invalid_value(&self) -> i16 {
        ((self.config.min_disparity - 1) * DISPARITY_SCALE as i32) as i16
    }

    fn prefilter(&self, image: &GrayImage) -> Vec<u8> {
        let cap = self.config.prefilter_cap;
        let (width, height) = (image.width, image.height);
        let mut out = vec![0u8; width * height];
        if width == 0 || height == 0 {
            return out;
        }

        out.par_chunks_mut(width).enumerate().for_each(|(y, out_row)| {
            let up = y.saturating_sub(1);
            let down = (y + 1).min(height - 1);
            for (x, out_px) in out_row.iter_mut().enumerate() {
                let l = x.saturating_sub(1);
                let r = (x + 1).min(width - 1);
                let px = |row: usize, col: usize| image.get(row, col) as i32;
                let sobel = (px(up, r) + 2 * px(y, r) + px(down, r))
                    - (px(up, l) + 2 * px(y, l) + px(down, l));
                *out_px = (sobel.clamp(-cap, cap) + cap) as u8;
            }
        });
        out
    }
}

impl StereoMatcher for CpuBlockMatcher {
    fn disparity_scale(&self) -> u32 {
        DISPARITY_SCALE
    }

    fn compute(&self, left: &GrayImage, right: &GrayImage, output: &mut RawDisparity) -> Result<()> {
        if left.dimensions() != right.dimensions() {
            return Err(StereoError::DimensionMismatch {
                expected: left.dimensions(),
                actual: right.dimensions(),
            });
        }
        let (width, height) = left.dimensions();
        info!("Starting CPU block matching for image {}x{}", width, height);

        output.resize(width, height);
        let invalid = self.invalid_value();
        output.data.fill(invalid);
        if width == 0 || height == 0 {
            return Ok(());
        }

        let left_f = self.prefilter(left);
        let right_f = self.prefilter(right);

        let cap = self.config.prefilter_cap;
        let half = self.config.correlation_window_size / 2;
        let min_d = self.config.min_disparity;
        let range = self.config.disparity_range as usize;
        let max_d = min_d + self.config.disparity_range - 1;
        let texture_threshold = self.config.texture_threshold as u32;
        let uniqueness = self.config.uniqueness_ratio;

        // Columns for which the window fits in both images for every candidate
        let x_start = half as i64 + (max_d as i64).max(0);
        let x_end = width as i64 - half as i64 + (min_d as i64).min(0);
        if height < 2 * half + 1 || x_start >= x_end {
            debug!("Image too small for window {} and range {}", half * 2 + 1, range);
            return Ok(());
        }

        output
            .data
            .par_chunks_mut(width)
            .enumerate()
            .skip(half)
            .take(height - 2 * half)
            .for_each(|(y, out_row)| {
                let mut costs = vec![0u32; range];
                for x in x_start as usize..x_end as usize {
                    let mut texture = 0u32;
                    for wy in y - half..=y + half {
                        let row = &left_f[wy * width..(wy + 1) * width];
                        for &v in &row[x - half..=x + half] {
                            texture += (v as i32 - cap).unsigned_abs();
                        }
                    }
                    if texture < texture_threshold {
                        continue;
                    }

                    for (i, cost) in costs.iter_mut().enumerate() {
                        let xr = (x as i64 - (min_d as i64 + i as i64)) as usize;
                        let mut sad = 0u32;
                        for wy in y - half..=y + half {
                            let lrow = &left_f[wy * width..(wy + 1) * width];
                            let rrow = &right_f[wy * width..(wy + 1) * width];
                            for k in 0..=2 * half {
                                sad += (lrow[x - half + k] as i32 - rrow[xr - half + k] as i32)
                                    .unsigned_abs();
                            }
                        }
                        *cost = sad;
                    }

                    let mut best = 0;
                    let mut best_cost = u32::MAX;
                    for (i, &c) in costs.iter().enumerate() {
                        if c < best_cost {
                            best = i;
                            best_cost = c;
                        }
                    }

                    let ambiguous = costs.iter().enumerate().any(|(i, &c)| {
                        i.abs_diff(best) > 1 && (c as f32) * (100.0 - uniqueness) < best_cost as f32 * 100.0
                    });
                    if ambiguous {
                        continue;
                    }

                    let mut offset = 0.0f32;
                    if best > 0 && best + 1 < range {
                        let prev = costs[best - 1] as f32;
                        let next = costs[best + 1] as f32;
                        let denom = prev + next - 2.0 * best_cost as f32;
                        if denom > 0.0 {
                            offset = ((prev - next) / (2.0 * denom)).clamp(-0.5, 0.5);
                        }
                    }
                    let d = (min_d + best as i32) as f32 + offset;
                    out_row[x] = (d * DISPARITY_SCALE as f32).round() as i16;
                }
            });

        Ok(())
    }
}
