//! Disparity normalization
//!
//! Turns the fixed-point output of a [`StereoMatcher`](crate::stereo_pipeline::matching::StereoMatcher)
//! into a calibrated floating-point [`DisparityImage`].

mod normalizer;
pub mod types;

pub use normalizer::normalize_disparity;
pub use types::{DisparityImage, MAX_DISPARITY, MIN_DISPARITY};
