//! Image containers shared by every pipeline stage

pub mod types;

pub use types::{ColorEncoding, ColorImage, GrayImage, ImageSet, RawImage};
