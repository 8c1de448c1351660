use crate::stereo_pipeline::camera::MISSING_Z;

/// Whether a reprojected point carries usable depth.
///
/// Rejects points the reprojection marked as missing and points at infinity
/// (zero disparity). Only `z` is inspected.
#[inline]
pub fn is_valid_point(point: &[f32; 3]) -> bool {
    point[2] != MISSING_Z && !point[2].is_infinite()
}
