//! Shared pixel walk used by both cloud builders.

use tracing::warn;

use crate::stereo_pipeline::common::error::{Result, StereoError, StereoWarning};
use crate::stereo_pipeline::image::ColorImage;
use crate::stereo_pipeline::points::color::ColorPacker;
use crate::stereo_pipeline::points::grid::DensePointGrid;
use crate::stereo_pipeline::points::validity::is_valid_point;

/// What the traversal knows about one pixel
#[derive(Debug, Clone, Copy)]
pub(crate) struct PixelVisit {
    /// Source row
    pub row: usize,
    /// Source column
    pub col: usize,
    /// Reprojected `[x, y, z]`
    pub point: [f32; 3],
    /// Result of the validity check
    pub valid: bool,
    /// Packed color, only for valid pixels with a recognized encoding
    pub rgb: Option<f32>,
}

/// Checks the color image against the grid and picks a packer for its encoding.
///
/// A recognized encoding must come with exactly `width * height * channels` bytes.
///
/// An unrecognized encoding is not an error: it is logged, recorded in
/// `warnings`, and the walk proceeds without color.
pub(crate) fn prepare(
    grid: &DensePointGrid,
    color: &ColorImage,
    warnings: &mut Vec<StereoWarning>,
) -> Result<Option<ColorPacker>> {
    if color.dimensions() != (grid.width, grid.height) {
        return Err(StereoError::DimensionMismatch {
            expected: (grid.width, grid.height),
            actual: color.dimensions(),
        });
    }

    let packer = ColorPacker::for_encoding(&color.encoding);
    if let Some(channels) = packer.and(color.encoding.channels()) {
        if color.data.len() != color.width * color.height * channels {
            return Err(StereoError::InvalidDimensions(color.width, color.height));
        }
    }
    if packer.is_none() {
        let warning = StereoWarning::UnrecognizedColorEncoding(color.encoding.to_string());
        warn!("{}", warning);
        warnings.push(warning);
    }
    Ok(packer)
}

/// Visits every pixel of `row` left to right
#[inline]
pub(crate) fn visit_row<F: FnMut(PixelVisit)>(
    grid: &DensePointGrid,
    color: &ColorImage,
    packer: Option<ColorPacker>,
    row: usize,
    mut emit: F,
) {
    for (col, point) in grid.row(row).iter().enumerate() {
        let valid = is_valid_point(point);
        let rgb = match (valid, packer) {
            (true, Some(packer)) => Some(packer.pack(color, row, col)),
            _ => None,
        };
        emit(PixelVisit {
            row,
            col,
            point: *point,
            valid,
            rgb,
        });
    }
}

/// Visits every pixel in raster order
pub(crate) fn visit_pixels<F: FnMut(PixelVisit)>(
    grid: &DensePointGrid,
    color: &ColorImage,
    packer: Option<ColorPacker>,
    mut emit: F,
) {
    for row in 0..grid.height {
        visit_row(grid, color, packer, row, &mut emit);
    }
}
