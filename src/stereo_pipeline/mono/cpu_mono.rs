//! Monocular processing on the CPU.
//!
//! Supports `mono8`, `rgb8`, `bgr8` and `bayer_rggb8` input. Rectification is
//! the identity: frames are expected to come from a camera that already
//! delivers rectified images, so the rectified views equal the plain ones.

use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use crate::stereo_pipeline::camera::PinholeCamera;
use crate::stereo_pipeline::common::error::{Result, StereoError};
use crate::stereo_pipeline::image::{ColorEncoding, ColorImage, GrayImage, ImageSet, RawImage};
use crate::stereo_pipeline::mono::processor::{MonoFlags, MonoProcessor};

pub struct CpuMonoProcessor;

impl CpuMonoProcessor {
    pub fn new() -> Self {
        Self
    }

    fn debayer_rggb(&self, raw: &RawImage) -> Result<Vec<u8>> {
        let mut output_buf = vec![0u8; raw.width * raw.height * 3];
        let mut cursor = Cursor::new(&raw.data[..]);
        let mut output_raster = RasterMut::new(raw.width, raw.height, RasterDepth::Depth8, &mut output_buf);

        bayer::run_demosaic(
            &mut cursor,
            BayerDepth::Depth8,
            CFA::RGGB,
            Demosaic::Linear,
            &mut output_raster,
        )
        .map_err(|e| StereoError::UnsupportedEncoding(format!("demosaic failed: {:?}", e)))?;

        Ok(output_buf)
    }

    fn decode(&self, raw: &RawImage) -> Result<(GrayImage, ColorImage)> {
        let (width, height) = (raw.width, raw.height);
        let channels = match raw.encoding.as_str() {
            "mono8" | "bayer_rggb8" => 1,
            "rgb8" | "bgr8" => 3,
            other => return Err(StereoError::UnsupportedEncoding(other.to_string())),
        };
        if raw.data.len() != width * height * channels {
            return Err(StereoError::InvalidDimensions(width, height));
        }

        match raw.encoding.as_str() {
            "mono8" => {
                let gray = GrayImage::from_vec(width, height, raw.data.clone());
                let color = ColorImage::new(width, height, ColorEncoding::Mono8, raw.data.clone());
                Ok((gray, color))
            }
            "bayer_rggb8" => {
                let rgb = self.debayer_rggb(raw)?;
                let gray = to_gray(&rgb, width, height, [0, 1, 2]);
                Ok((gray, ColorImage::new(width, height, ColorEncoding::Rgb8, rgb)))
            }
            "rgb8" => {
                let gray = to_gray(&raw.data, width, height, [0, 1, 2]);
                let color = ColorImage::new(width, height, ColorEncoding::Rgb8, raw.data.clone());
                Ok((gray, color))
            }
            _ => {
                let gray = to_gray(&raw.data, width, height, [2, 1, 0]);
                let color = ColorImage::new(width, height, ColorEncoding::Bgr8, raw.data.clone());
                Ok((gray, color))
            }
        }
    }
}

impl Default for CpuMonoProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// BT.601 luma in 14-bit fixed point; `order` gives the R, G, B byte positions
fn to_gray(data: &[u8], width: usize, height: usize, order: [usize; 3]) -> GrayImage {
    let gray = data
        .chunks_exact(3)
        .map(|px| {
            let (r, g, b) = (px[order[0]] as u32, px[order[1]] as u32, px[order[2]] as u32);
            ((r * 4899 + g * 9617 + b * 1868 + 8192) >> 14) as u8
        })
        .collect();
    GrayImage::from_vec(width, height, gray)
}

impl MonoProcessor for CpuMonoProcessor {
    fn process(&self, raw: &RawImage, camera: &PinholeCamera, flags: MonoFlags) -> Result<ImageSet> {
        if camera.width != 0 && (camera.width, camera.height) != (raw.width, raw.height) {
            return Err(StereoError::DimensionMismatch {
                expected: (camera.width, camera.height),
                actual: (raw.width, raw.height),
            });
        }
        debug!(
            "Monocular processing {}x{} {} with flags {:#06b}",
            raw.width,
            raw.height,
            raw.encoding,
            flags.bits()
        );

        let mut output = ImageSet::default();
        if flags.is_empty() {
            return Ok(output);
        }

        let (gray, color) = self.decode(raw)?;
        if flags.contains(MonoFlags::MONO) {
            output.mono = Some(gray.clone());
        }
        if flags.contains(MonoFlags::RECT) {
            output.rect = Some(gray);
        }
        if flags.contains(MonoFlags::COLOR) {
            output.color = Some(color.clone());
        }
        if flags.contains(MonoFlags::RECT_COLOR) {
            output.rect_color = Some(color);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(width: usize, height: usize) -> PinholeCamera {
        PinholeCamera::new(width, height, 100.0, 100.0, width as f64 / 2.0, height as f64 / 2.0)
    }

    fn raw(width: usize, height: usize, encoding: &str, data: Vec<u8>) -> RawImage {
        RawImage {
            width,
            height,
            encoding: encoding.to_string(),
            data,
        }
    }

    #[test]
    fn test_only_requested_views() {
        let processor = CpuMonoProcessor::new();
        let image = raw(2, 1, "mono8", vec![5, 6]);
        let out = processor
            .process(&image, &camera(2, 1), MonoFlags::RECT | MonoFlags::RECT_COLOR)
            .unwrap();

        assert!(out.mono.is_none());
        assert!(out.color.is_none());
        assert_eq!(out.rect.unwrap().data, vec![5, 6]);
        let rect_color = out.rect_color.unwrap();
        assert_eq!(rect_color.encoding, ColorEncoding::Mono8);
        assert_eq!(rect_color.data, vec![5, 6]);
    }

    #[test]
    fn test_bgr_keeps_encoding_and_converts_gray() {
        let processor = CpuMonoProcessor::new();
        // Pure red and pure white in BGR order
        let image = raw(2, 1, "bgr8", vec![0, 0, 255, 255, 255, 255]);
        let out = processor.process(&image, &camera(2, 1), MonoFlags::ALL).unwrap();

        assert_eq!(out.color.unwrap().encoding, ColorEncoding::Bgr8);
        let mono = out.mono.unwrap();
        assert_eq!(mono.data[0], 76);
        assert_eq!(mono.data[1], 255);
    }

    #[test]
    fn test_bayer_is_debayered_to_rgb() {
        let processor = CpuMonoProcessor::new();
        let image = raw(4, 4, "bayer_rggb8", vec![100; 16]);
        let out = processor.process(&image, &camera(4, 4), MonoFlags::RECT_COLOR).unwrap();

        let color = out.rect_color.unwrap();
        assert_eq!(color.encoding, ColorEncoding::Rgb8);
        assert_eq!(color.data.len(), 4 * 4 * 3);
    }

    #[test]
    fn test_rejects_unknown_encoding_and_bad_sizes() {
        let processor = CpuMonoProcessor::new();
        let image = raw(2, 1, "yuv422", vec![0; 4]);
        assert!(matches!(
            processor.process(&image, &camera(2, 1), MonoFlags::RECT),
            Err(StereoError::UnsupportedEncoding(_))
        ));

        let image = raw(2, 2, "mono8", vec![0; 3]);
        assert!(matches!(
            processor.process(&image, &camera(2, 2), MonoFlags::RECT),
            Err(StereoError::InvalidDimensions(2, 2))
        ));

        let image = raw(2, 2, "mono8", vec![0; 4]);
        assert!(matches!(
            processor.process(&image, &camera(3, 2), MonoFlags::RECT),
            Err(StereoError::DimensionMismatch { .. })
        ));
    }
}
