use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::stereo_pipeline::camera::PinholeCamera;
use crate::stereo_pipeline::common::error::Result;
use crate::stereo_pipeline::image::{ImageSet, RawImage};

/// Views requested from the monocular stage for one camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonoFlags(u8);

impl MonoFlags {
    pub const NONE: Self = Self(0);
    pub const MONO: Self = Self(1 << 0);
    pub const RECT: Self = Self(1 << 1);
    pub const COLOR: Self = Self(1 << 2);
    pub const RECT_COLOR: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MonoFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MonoFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for MonoFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

pub trait MonoProcessor {
    /// Produces the requested views of `raw`. Views that were not requested are left `None`.
    fn process(&self, raw: &RawImage, camera: &PinholeCamera, flags: MonoFlags) -> Result<ImageSet>;
}
