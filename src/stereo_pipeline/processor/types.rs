//! Processor input/output types

use crate::stereo_pipeline::common::error::StereoWarning;
use crate::stereo_pipeline::disparity::DisparityImage;
use crate::stereo_pipeline::image::ImageSet;
use crate::stereo_pipeline::matching::RawDisparity;
use crate::stereo_pipeline::points::{DensePointGrid, SparsePointCloud, StructuredPointCloud};

/// Scratch buffers reused across [`StereoProcessor`](super::StereoProcessor) calls.
///
/// A workspace serves one call at a time (calls take it by `&mut`); every call
/// overwrites the buffers before reading them. Use one workspace per thread to
/// run a shared processor concurrently.
#[derive(Debug, Default)]
pub struct StereoWorkspace {
    /// Fixed-point matcher output
    pub raw_disparity: RawDisparity,
    /// Reprojected points shared by both cloud builders
    pub dense_points: DensePointGrid,
}

impl StereoWorkspace {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything produced by one processing call. Outputs that were not
/// requested, directly or as a prerequisite, are left empty.
#[derive(Debug, Clone, Default)]
pub struct StereoImageSet {
    /// Monocular views of the left camera
    pub left: ImageSet,
    /// Monocular views of the right camera
    pub right: ImageSet,
    /// Normalized disparity, left image geometry
    pub disparity: Option<DisparityImage>,
    /// Sparse cloud of valid points
    pub points: Option<SparsePointCloud>,
    /// Structured cloud with one record per pixel
    pub points2: Option<StructuredPointCloud>,
    /// Non-fatal problems encountered while producing the outputs
    pub warnings: Vec<StereoWarning>,
}
