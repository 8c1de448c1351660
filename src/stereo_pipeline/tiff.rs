//! Disparity export as single-channel float TIFF.

mod disparity_writer;
pub mod types;
mod writer;

pub use disparity_writer::DisparityTiffWriter;
pub use types::TiffCompression;
pub use writer::DisparityWriter;
