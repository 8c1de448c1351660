use rayon::prelude::*;
use tracing::debug;

use crate::stereo_pipeline::common::error::{Result, StereoWarning};
use crate::stereo_pipeline::image::ColorImage;
use crate::stereo_pipeline::points::grid::DensePointGrid;
use crate::stereo_pipeline::points::traversal::{prepare, visit_row};
use crate::stereo_pipeline::points::types::{PointXyzRgb, StructuredPointCloud};

/// Writes one record per pixel of `grid`.
///
/// Invalid pixels become all-NaN records. Valid pixels get NaN color when the
/// encoding is not recognized. Rows are filled in parallel.
pub fn build_structured_cloud(
    grid: &DensePointGrid,
    color: &ColorImage,
    warnings: &mut Vec<StereoWarning>,
) -> Result<StructuredPointCloud> {
    let packer = prepare(grid, color, warnings)?;

    let mut cloud = StructuredPointCloud::new(grid.width, grid.height);
    if cloud.row_step == 0 {
        return Ok(cloud);
    }
    let point_step = cloud.point_step;

    cloud
        .data
        .par_chunks_mut(cloud.row_step)
        .enumerate()
        .for_each(|(row, row_bytes)| {
            visit_row(grid, color, packer, row, |pixel| {
                let record = if pixel.valid {
                    let [x, y, z] = pixel.point;
                    PointXyzRgb {
                        x,
                        y,
                        z,
                        rgb: pixel.rgb.unwrap_or(f32::NAN),
                    }
                } else {
                    PointXyzRgb::NAN
                };
                let start = pixel.col * point_step;
                row_bytes[start..start + point_step].copy_from_slice(bytemuck::bytes_of(&record));
            });
        });

    debug!("Structured cloud: {}x{} records", cloud.width, cloud.height);
    Ok(cloud)
}
