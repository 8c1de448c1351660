/// Per-pixel 3-D reconstruction of a disparity image.
///
/// Used as a scratch buffer: [`StereoCalibration::unproject`](crate::stereo_pipeline::camera::StereoCalibration::unproject)
/// overwrites every point on each call.
#[derive(Debug, Clone, Default)]
pub struct DensePointGrid {
    /// Width of the grid in pixels
    pub width: usize,
    /// Height of the grid in pixels
    pub height: usize,
    /// `[x, y, z]` per pixel, row-major
    pub points: Vec<[f32; 3]>,
}

impl DensePointGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            points: vec![[0.0; 3]; width * height],
        }
    }

    pub fn from_vec(width: usize, height: usize, points: Vec<[f32; 3]>) -> Self {
        debug_assert_eq!(points.len(), width * height);
        Self {
            width,
            height,
            points,
        }
    }

    /// Reshapes the grid, keeping the allocation when possible
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.points.resize(width * height, [0.0; 3]);
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> [f32; 3] {
        self.points[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[[f32; 3]] {
        &self.points[row * self.width..(row + 1) * self.width]
    }
}
