use tracing::debug;

use crate::stereo_pipeline::camera::StereoCalibration;
use crate::stereo_pipeline::disparity::types::DisparityImage;
use crate::stereo_pipeline::matching::RawDisparity;

/// Converts fixed-point matcher output to pixels and removes the principal point offset:
/// `d = raw / disparity_scale - (cx_left - cx_right)`.
///
/// `disparity_scale` is the matcher's fixed-point factor (16 for the CPU block
/// matcher, 1 for the CUDA one).
pub fn normalize_disparity<C: StereoCalibration + ?Sized>(
    raw: &RawDisparity,
    disparity_scale: u32,
    model: &C,
) -> DisparityImage {
    let inv_dpp = 1.0 / disparity_scale as f64;
    let offset = model.left().cx() - model.right().cx();
    debug!(
        "Normalizing {}x{} disparity, delta_d={}, principal point offset={}",
        raw.width, raw.height, inv_dpp, offset
    );

    let data: Vec<f32> = raw
        .data
        .iter()
        .map(|&r| (r as f64 * inv_dpp - offset) as f32)
        .collect();

    DisparityImage::new(
        raw.width,
        raw.height,
        data,
        model.right().fx() as f32,
        model.baseline() as f32,
        inv_dpp as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stereo_pipeline::camera::{PinholeCamera, StereoCameraModel};
    use crate::stereo_pipeline::disparity::types::{MAX_DISPARITY, MIN_DISPARITY};
    use rand::prelude::*;

    fn model_with_cx(cx_left: f64, cx_right: f64) -> StereoCameraModel {
        let left = PinholeCamera::new(2, 2, 400.0, 410.0, cx_left, 1.0);
        let right = PinholeCamera::new(2, 2, 420.0, 410.0, cx_right, 1.0);
        StereoCameraModel::from_baseline(left, right, 0.12)
    }

    #[test]
    fn test_fixed_point_scaling() {
        let raw = RawDisparity::from_vec(2, 2, vec![160, 0, -1, 320]);
        let disparity = normalize_disparity(&raw, 16, &model_with_cx(1.0, 1.0));

        assert_eq!(disparity.data, vec![10.0, 0.0, -0.0625, 20.0]);
        assert_eq!(disparity.get(0, 1), 0.0);
        assert_eq!(disparity.get(1, 0), -0.0625);
    }

    #[test]
    fn test_metadata() {
        let raw = RawDisparity::new(2, 2);
        let disparity = normalize_disparity(&raw, 16, &model_with_cx(1.0, 1.0));

        assert_eq!(disparity.width, 2);
        assert_eq!(disparity.height, 2);
        assert_eq!(disparity.step, 8);
        assert_eq!(disparity.encoding(), "32FC1");
        assert_eq!(disparity.focal_length, 420.0);
        assert!((disparity.baseline - 0.12).abs() < 1e-6);
        assert_eq!(disparity.min_disparity, MIN_DISPARITY);
        assert_eq!(disparity.max_disparity, MAX_DISPARITY);
        assert_eq!(disparity.delta_d, 0.0625);
        assert_eq!(disparity.as_bytes().len(), disparity.step * disparity.height);
    }

    #[test]
    fn test_whole_pixel_scale() {
        let raw = RawDisparity::from_vec(2, 1, vec![7, 0]);
        let disparity = normalize_disparity(&raw, 1, &model_with_cx(1.0, 1.0));
        assert_eq!(disparity.data, vec![7.0, 0.0]);
        assert_eq!(disparity.delta_d, 1.0);
    }

    #[test]
    fn test_principal_point_correction() {
        // cx_left - cx_right = 2.5 is subtracted from every pixel
        let raw = RawDisparity::from_vec(2, 1, vec![160, -16]);
        let disparity = normalize_disparity(&raw, 16, &model_with_cx(12.5, 10.0));
        assert_eq!(disparity.data, vec![7.5, -3.5]);
    }

    #[test]
    fn test_formula_over_random_inputs() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let cx_left = rng.gen_range(100.0..700.0);
            let cx_right = rng.gen_range(100.0..700.0);
            let model = model_with_cx(cx_left, cx_right);
            let scale = if rng.gen_bool(0.5) { 16 } else { 1 };
            let (w, h) = (rng.gen_range(1..12), rng.gen_range(1..12));
            let data: Vec<i16> = (0..w * h).map(|_| rng.gen_range(i16::MIN..=i16::MAX)).collect();
            let raw = RawDisparity::from_vec(w, h, data);

            let disparity = normalize_disparity(&raw, scale, &model);
            let delta_d = 1.0 / scale as f64;
            assert_eq!(disparity.delta_d, delta_d as f32);
            for (i, &r) in raw.data.iter().enumerate() {
                let expected = (r as f64 * delta_d - (cx_left - cx_right)) as f32;
                assert_eq!(disparity.data[i], expected, "pixel {} raw {}", i, r);
            }
        }
    }
}
