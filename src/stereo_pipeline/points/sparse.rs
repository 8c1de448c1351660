use tracing::debug;

use crate::stereo_pipeline::common::error::{Result, StereoWarning};
use crate::stereo_pipeline::image::ColorImage;
use crate::stereo_pipeline::points::grid::DensePointGrid;
use crate::stereo_pipeline::points::traversal::{prepare, visit_pixels};
use crate::stereo_pipeline::points::types::{ChannelFloat32, Point32, SparsePointCloud};

/// Collects the valid points of `grid` in raster order.
///
/// The `rgb` channel stays empty when the color encoding is not recognized;
/// `u` and `v` are always filled.
pub fn build_sparse_cloud(
    grid: &DensePointGrid,
    color: &ColorImage,
    warnings: &mut Vec<StereoWarning>,
) -> Result<SparsePointCloud> {
    let packer = prepare(grid, color, warnings)?;

    let mut points = Vec::new();
    let mut rgb = ChannelFloat32::new(SparsePointCloud::RGB);
    let mut u = ChannelFloat32::new(SparsePointCloud::U);
    let mut v = ChannelFloat32::new(SparsePointCloud::V);

    visit_pixels(grid, color, packer, |pixel| {
        if !pixel.valid {
            return;
        }
        let [x, y, z] = pixel.point;
        points.push(Point32 { x, y, z });
        u.values.push(pixel.row as f32);
        v.values.push(pixel.col as f32);
        if let Some(packed) = pixel.rgb {
            rgb.values.push(packed);
        }
    });

    debug!(
        "Sparse cloud: {} of {} points valid",
        points.len(),
        grid.width * grid.height
    );

    Ok(SparsePointCloud {
        points,
        channels: vec![rgb, u, v],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stereo_pipeline::camera::MISSING_Z;
    use crate::stereo_pipeline::common::error::StereoError;
    use crate::stereo_pipeline::image::ColorEncoding;
    use crate::stereo_pipeline::points::color::unpack_rgb;

    // 2x3 grid, invalid at (0,1) [infinite] and (1,0) [missing]
    fn sample_grid() -> DensePointGrid {
        DensePointGrid::from_vec(
            3,
            2,
            vec![
                [0.0, 0.0, 1.0],
                [0.1, 0.0, f32::INFINITY],
                [0.2, 0.0, 3.0],
                [0.0, 0.1, MISSING_Z],
                [0.1, 0.1, 5.0],
                [0.2, 0.1, 6.0],
            ],
        )
    }

    fn rgb_image() -> ColorImage {
        let data = (0..6u8).flat_map(|i| [i * 10, i * 10 + 1, i * 10 + 2]).collect();
        ColorImage::new(3, 2, ColorEncoding::Rgb8, data)
    }

    #[test]
    fn test_skips_invalid_in_raster_order() {
        let mut warnings = Vec::new();
        let cloud = build_sparse_cloud(&sample_grid(), &rgb_image(), &mut warnings).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(cloud.len(), 4);
        let zs: Vec<f32> = cloud.points.iter().map(|p| p.z).collect();
        assert_eq!(zs, vec![1.0, 3.0, 5.0, 6.0]);
        assert_eq!(cloud.channel("u").unwrap().values, vec![0.0, 0.0, 1.0, 1.0]);
        assert_eq!(cloud.channel("v").unwrap().values, vec![0.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_channels_parallel_to_points() {
        let mut warnings = Vec::new();
        let cloud = build_sparse_cloud(&sample_grid(), &rgb_image(), &mut warnings).unwrap();

        let names: Vec<&str> = cloud.channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["rgb", "u", "v"]);
        for channel in &cloud.channels {
            assert_eq!(channel.values.len(), cloud.points.len());
        }
        let colors: Vec<[u8; 3]> = cloud.channel("rgb").unwrap().values.iter().map(|&c| unpack_rgb(c)).collect();
        assert_eq!(colors, vec![[0, 1, 2], [20, 21, 22], [40, 41, 42], [50, 51, 52]]);
    }

    #[test]
    fn test_unrecognized_encoding_leaves_color_empty() {
        let color = ColorImage::new(3, 2, ColorEncoding::from("YUV422"), vec![0; 12]);
        let mut warnings = Vec::new();
        let cloud = build_sparse_cloud(&sample_grid(), &color, &mut warnings).unwrap();

        assert_eq!(cloud.len(), 4);
        assert!(cloud.channel("rgb").unwrap().values.is_empty());
        assert_eq!(cloud.channel("u").unwrap().values.len(), 4);
        assert_eq!(
            warnings,
            vec![StereoWarning::UnrecognizedColorEncoding("YUV422".to_string())]
        );
    }

    #[test]
    fn test_color_size_mismatch() {
        let color = ColorImage::new(2, 2, ColorEncoding::Mono8, vec![0; 4]);
        let mut warnings = Vec::new();
        let result = build_sparse_cloud(&sample_grid(), &color, &mut warnings);
        assert!(result.is_err());
    }

    #[test]
    fn test_color_buffer_too_short_for_encoding() {
        let grid = DensePointGrid::from_vec(2, 2, vec![[0.0, 0.0, 1.0]; 4]);
        // rgb8 needs 12 bytes for 2x2
        let color = ColorImage::new(2, 2, ColorEncoding::Rgb8, vec![0; 4]);
        let mut warnings = Vec::new();
        let result = build_sparse_cloud(&grid, &color, &mut warnings);
        assert!(matches!(result, Err(StereoError::InvalidDimensions(2, 2))));

        let result = crate::stereo_pipeline::points::build_structured_cloud(&grid, &color, &mut warnings);
        assert!(matches!(result, Err(StereoError::InvalidDimensions(2, 2))));
        assert!(warnings.is_empty());
    }
}
