//! Stereo processing pipeline module
//!
//! Turns a raw stereo pair into monocular views, a calibrated disparity image
//! and point clouds in two layouts. Each stage lives in its own module and the
//! [`StereoProcessor`] sequences them according to the requested outputs.

pub mod camera;
pub mod common;
pub mod config;
pub mod disparity;
pub mod image;
pub mod matching;
pub mod mono;
pub mod points;
pub mod processor;
pub mod tiff;

pub use common::{Result, StereoError, StereoWarning};

pub use camera::{MISSING_Z, PinholeCamera, StereoCalibration, StereoCameraModel};

pub use config::{StereoConfig, StereoConfigBuilder};

pub use disparity::{DisparityImage, normalize_disparity};

pub use image::{ColorEncoding, ColorImage, GrayImage, ImageSet, RawImage};

pub use matching::{BlockMatcherConfig, CpuBlockMatcher, CudaBlockMatcher, RawDisparity, StereoMatcher};

pub use mono::{CpuMonoProcessor, MonoFlags, MonoProcessor};

pub use points::{
    DensePointGrid, SparsePointCloud, StructuredPointCloud, build_sparse_cloud,
    build_structured_cloud, is_valid_point,
};

pub use processor::{OutputFlags, StereoImageSet, StereoProcessor, StereoWorkspace};

pub use self::tiff::{DisparityTiffWriter, DisparityWriter, TiffCompression};
