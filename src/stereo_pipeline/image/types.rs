//! Image data types

use std::fmt;
use std::str::FromStr;

/// Single channel 8-bit image, row-major with no padding
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixel data [p(0,0), p(0,1), ...]
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self { width, height, data }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Pixel encoding of a color image.
///
/// Only `mono8`, `rgb8` and `bgr8` can be packed into point clouds; anything else
/// is carried through as `Other` so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorEncoding {
    Mono8,
    Rgb8,
    Bgr8,
    Other(String),
}

impl ColorEncoding {
    pub fn as_str(&self) -> &str {
        match self {
            ColorEncoding::Mono8 => "mono8",
            ColorEncoding::Rgb8 => "rgb8",
            ColorEncoding::Bgr8 => "bgr8",
            ColorEncoding::Other(name) => name,
        }
    }

    /// Bytes per pixel, `None` for encodings this crate can't interpret
    pub fn channels(&self) -> Option<usize> {
        match self {
            ColorEncoding::Mono8 => Some(1),
            ColorEncoding::Rgb8 | ColorEncoding::Bgr8 => Some(3),
            ColorEncoding::Other(_) => None,
        }
    }
}

impl FromStr for ColorEncoding {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mono8" => ColorEncoding::Mono8,
            "rgb8" => ColorEncoding::Rgb8,
            "bgr8" => ColorEncoding::Bgr8,
            other => ColorEncoding::Other(other.to_string()),
        })
    }
}

impl From<&str> for ColorEncoding {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(encoding) => encoding,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ColorEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interleaved 8-bit color image
#[derive(Debug, Clone, PartialEq)]
pub struct ColorImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Channel layout of `data`
    pub encoding: ColorEncoding,
    /// Interleaved pixel data, `width * channels` bytes per row
    pub data: Vec<u8>,
}

impl ColorImage {
    pub fn new(width: usize, height: usize, encoding: ColorEncoding, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            encoding,
            data,
        }
    }

    /// Raw bytes of the pixel at (row, col), `channels` long
    #[inline]
    pub fn pixel(&self, row: usize, col: usize, channels: usize) -> &[u8] {
        let start = (row * self.width + col) * channels;
        &self.data[start..start + channels]
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Unprocessed camera frame handed to the monocular stage
#[derive(Debug, Clone)]
pub struct RawImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Encoding tag, e.g. `mono8`, `rgb8`, `bgr8` or `bayer_rggb8`
    pub encoding: String,
    /// Pixel data
    pub data: Vec<u8>,
}

/// Per-camera products of the monocular stage.
///
/// Each view is only present when it was requested.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    /// Grayscale view of the raw frame
    pub mono: Option<GrayImage>,
    /// Rectified grayscale view
    pub rect: Option<GrayImage>,
    /// Color view of the raw frame
    pub color: Option<ColorImage>,
    /// Rectified color view
    pub rect_color: Option<ColorImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_parse() {
        assert_eq!(ColorEncoding::from("mono8"), ColorEncoding::Mono8);
        assert_eq!(ColorEncoding::from("rgb8"), ColorEncoding::Rgb8);
        assert_eq!(ColorEncoding::from("bgr8"), ColorEncoding::Bgr8);
        assert_eq!(
            ColorEncoding::from("YUV422"),
            ColorEncoding::Other("YUV422".to_string())
        );
        assert_eq!(ColorEncoding::from("YUV422").to_string(), "YUV422");
    }

    #[test]
    fn test_color_pixel_access() {
        // 2x1 rgb8: [(1,2,3), (4,5,6)]
        let img = ColorImage::new(2, 1, ColorEncoding::Rgb8, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.pixel(0, 1, 3), &[4, 5, 6]);
        assert_eq!(img.pixel(0, 0, 3), &[1, 2, 3]);
    }
}
