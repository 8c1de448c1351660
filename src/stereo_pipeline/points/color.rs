//! Packed RGB color for point clouds.
//!
//! Colors are stored as `0x00RRGGBB` in the bits of an `f32`. The float is a
//! container only; the value must be moved with `to_bits`/`from_bits`, never
//! converted numerically.

use crate::stereo_pipeline::image::{ColorEncoding, ColorImage};

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> f32 {
    let packed = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
    f32::from_bits(packed)
}

#[inline]
pub fn unpack_rgb(rgb: f32) -> [u8; 3] {
    let packed = rgb.to_bits();
    [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]
}

/// Per-encoding pixel reader for the encodings that can be packed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPacker {
    Mono8,
    Rgb8,
    Bgr8,
}

impl ColorPacker {
    pub fn for_encoding(encoding: &ColorEncoding) -> Option<Self> {
        match encoding {
            ColorEncoding::Mono8 => Some(ColorPacker::Mono8),
            ColorEncoding::Rgb8 => Some(ColorPacker::Rgb8),
            ColorEncoding::Bgr8 => Some(ColorPacker::Bgr8),
            ColorEncoding::Other(_) => None,
        }
    }

    #[inline]
    pub fn pack(self, image: &ColorImage, row: usize, col: usize) -> f32 {
        match self {
            ColorPacker::Mono8 => {
                let g = image.pixel(row, col, 1)[0];
                pack_rgb(g, g, g)
            }
            ColorPacker::Rgb8 => {
                let px = image.pixel(row, col, 3);
                pack_rgb(px[0], px[1], px[2])
            }
            ColorPacker::Bgr8 => {
                let px = image.pixel(row, col, 3);
                pack_rgb(px[2], px[1], px[0])
            }
        }
    }
}
