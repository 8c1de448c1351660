use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::stereo_pipeline::common::error::{Result, StereoError};
use crate::stereo_pipeline::disparity::DisparityImage;
use crate::stereo_pipeline::tiff::types::TiffCompression;
use crate::stereo_pipeline::tiff::writer::DisparityWriter;

/// Writes disparity images as `Gray32Float` TIFF, one sample per pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisparityTiffWriter {
    compression: TiffCompression,
}

impl DisparityTiffWriter {
    pub fn new(compression: TiffCompression) -> Self {
        Self { compression }
    }

    pub fn compression(&self) -> TiffCompression {
        self.compression
    }

    pub fn write_file<P: AsRef<Path>>(&self, image: &DisparityImage, path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Writing disparity TIFF: {}", path.display());
        let mut output = BufWriter::new(File::create(path)?);
        self.write_disparity(image, &mut output)?;
        output.flush()?;
        Ok(())
    }
}

impl DisparityWriter for DisparityTiffWriter {
    fn write_disparity(&self, image: &DisparityImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding disparity TIFF: {}x{}", image.width, image.height);
        if image.width == 0 || image.height == 0 {
            return Err(StereoError::InvalidDimensions(image.width, image.height));
        }

        // The encoder needs Seek, so encode into memory first
        let mut buffer = Vec::new();
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| StereoError::EncodeError(e.to_string()))?
            .with_compression(self.compression.to_encoder());

        encoder
            .write_image::<tiff::encoder::colortype::Gray32Float>(
                image.width as u32,
                image.height as u32,
                &image.data,
            )
            .map_err(|e| StereoError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tiff::decoder::{Decoder, DecodingResult};

    fn sample() -> DisparityImage {
        DisparityImage::new(3, 2, vec![1.0, 2.5, -1.0, 0.0, 63.0, 10.0625], 100.0, 0.1, 1.0 / 16.0)
    }

    fn decode(bytes: Vec<u8>) -> (u32, u32, Vec<f32>) {
        let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
        let (width, height) = decoder.dimensions().unwrap();
        match decoder.read_image().unwrap() {
            DecodingResult::F32(data) => (width, height, data),
            _ => panic!("expected f32 samples"),
        }
    }

    #[test]
    fn test_write_uncompressed() {
        let image = sample();
        let mut bytes = Vec::new();
        DisparityTiffWriter::default().write_disparity(&image, &mut bytes).unwrap();

        let (width, height, data) = decode(bytes);
        assert_eq!((width, height), (3, 2));
        assert_eq!(data, image.data);
    }

    #[test]
    fn test_write_deflate() {
        let image = sample();
        let mut bytes = Vec::new();
        DisparityTiffWriter::new(TiffCompression::Deflate)
            .write_disparity(&image, &mut bytes)
            .unwrap();

        assert_eq!(decode(bytes).2, image.data);
    }

    #[test]
    fn test_empty_image_rejected() {
        let image = DisparityImage::new(0, 0, Vec::new(), 100.0, 0.1, 1.0);
        let mut bytes = Vec::new();
        let result = DisparityTiffWriter::default().write_disparity(&image, &mut bytes);
        assert!(matches!(result, Err(StereoError::InvalidDimensions(0, 0))));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disparity.tiff");
        DisparityTiffWriter::new(TiffCompression::Lzw)
            .write_file(&sample(), &path)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(decode(bytes).0, 3);
    }
}
