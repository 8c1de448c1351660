use crate::stereo_pipeline::camera::types::PinholeCamera;
use crate::stereo_pipeline::disparity::types::DisparityImage;
use crate::stereo_pipeline::points::grid::DensePointGrid;

pub trait StereoCalibration {
    fn left(&self) -> &PinholeCamera;
    fn right(&self) -> &PinholeCamera;
    /// Distance between the two optical centers, in the units of the calibration
    fn baseline(&self) -> f64;
    /// Reprojects every disparity pixel to a 3-D point in the left camera frame,
    /// overwriting `grid` and resizing it to match `disparity`.
    fn unproject(&self, disparity: &DisparityImage, grid: &mut DensePointGrid);
}
