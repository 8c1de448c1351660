//! Pipeline orchestration
//!
//! Sequences monocular processing, disparity normalization and cloud building
//! according to the requested [`OutputFlags`].

mod flags;
mod stereo_processor;
pub mod types;


pub use flags::OutputFlags;
pub use stereo_processor::StereoProcessor;
pub use types::{StereoImageSet, StereoWorkspace};
