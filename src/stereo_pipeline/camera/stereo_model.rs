//! Pinhole stereo model with disparity reprojection.

use rayon::prelude::*;
use tracing::debug;

use crate::stereo_pipeline::camera::calibration::StereoCalibration;
use crate::stereo_pipeline::camera::types::PinholeCamera;
use crate::stereo_pipeline::disparity::types::DisparityImage;
use crate::stereo_pipeline::points::grid::DensePointGrid;

/// Depth assigned to pixels whose disparity equals the image minimum, which the
/// block matchers use to mark "no match".
pub const MISSING_Z: f32 = 10000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StereoCameraModel {
    left: PinholeCamera,
    right: PinholeCamera,
}

impl StereoCameraModel {
    /// Builds a model from both projection parameter sets. The baseline is
    /// recovered from the right camera's `tx`.
    pub fn new(left: PinholeCamera, right: PinholeCamera) -> Self {
        Self { left, right }
    }

    /// Builds a model from an explicit baseline, overriding the right camera's `tx`.
    pub fn from_baseline(left: PinholeCamera, right: PinholeCamera, baseline: f64) -> Self {
        let right = right.with_tx(-right.fx * baseline);
        Self { left, right }
    }

    /// Reprojection matrix mapping `[col, row, d, 1]` to homogeneous `[X, Y, Z, W]`.
    ///
    /// The last entry is zero because disparities reaching this model have
    /// already been corrected for the principal point offset.
    pub fn reprojection_matrix(&self) -> [[f64; 4]; 4] {
        let tx = -self.baseline();
        let (fx, fy, cx, cy) = (self.left.fx, self.left.fy, self.left.cx, self.left.cy);
        [
            [fy * tx, 0.0, 0.0, -fy * cx * tx],
            [0.0, fx * tx, 0.0, -fx * cy * tx],
            [0.0, 0.0, 0.0, fx * fy * tx],
            [0.0, 0.0, -fy, 0.0],
        ]
    }
}

impl StereoCalibration for StereoCameraModel {
    fn left(&self) -> &PinholeCamera {
        &self.left
    }

    fn right(&self) -> &PinholeCamera {
        &self.right
    }

    fn baseline(&self) -> f64 {
        -self.right.tx / self.right.fx
    }

    fn unproject(&self, disparity: &DisparityImage, grid: &mut DensePointGrid) {
        let width = disparity.width;
        let height = disparity.height;
        grid.resize(width, height);
        if width == 0 || height == 0 {
            return;
        }

        let q = self.reprojection_matrix();

        // The matchers write their invalid marker as the smallest value in the image
        let min_disparity = disparity
            .data
            .iter()
            .copied()
            .fold(f32::INFINITY, f32::min);
        debug!("Reprojecting {}x{} disparity image, min disparity {}", width, height, min_disparity);

        grid.points
            .par_chunks_mut(width)
            .zip(disparity.data.par_chunks(width))
            .enumerate()
            .for_each(|(row, (points_row, disparity_row))| {
                let y = row as f64;
                for (col, (point, &d)) in points_row.iter_mut().zip(disparity_row).enumerate() {
                    let x = col as f64;
                    let df = d as f64;

                    let mut hom = [0.0f64; 4];
                    for r in 0..4 {
                        hom[r] = q[r][0] * x + q[r][1] * y + q[r][2] * df + q[r][3];
                    }
                    let inv_w = 1.0 / hom[3];

                    let mut z = (hom[2] * inv_w) as f32;
                    if (d - min_disparity).abs() <= f32::EPSILON {
                        z = MISSING_Z;
                    }
                    *point = [(hom[0] * inv_w) as f32, (hom[1] * inv_w) as f32, z];
                }
            });
    }
}
