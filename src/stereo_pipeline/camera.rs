//! Stereo camera geometry
//!
//! The pipeline only talks to calibration through [`StereoCalibration`];
//! [`StereoCameraModel`] is the pinhole implementation used by default.

mod calibration;
mod stereo_model;
pub mod types;

pub use calibration::StereoCalibration;
pub use stereo_model::{MISSING_Z, StereoCameraModel};
pub use types::PinholeCamera;
