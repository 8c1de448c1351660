use thiserror::Error;

#[derive(Error, Debug)]
pub enum StereoError {
    #[error("Monocular processing failed for {side} image: {reason}")]
    Upstream { side: &'static str, reason: String },

    #[error("Stereo matching failed: {0}")]
    Matching(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Image dimensions do not match: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("CUDA error: {0}")]
    Cuda(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal conditions reported alongside a successful result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StereoWarning {
    #[error("Could not fill color channel of the point cloud, unrecognized encoding '{0}'")]
    UnrecognizedColorEncoding(String),
}

pub type Result<T> = std::result::Result<T, StereoError>;
