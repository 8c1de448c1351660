use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::stereo_pipeline::mono::MonoFlags;

/// Outputs requested from one [`StereoProcessor::process`](super::StereoProcessor::process) call.
///
/// The low nibble holds the left camera views, the next nibble the right camera
/// views, followed by the stereo products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFlags(u32);

impl OutputFlags {
    pub const NONE: Self = Self(0);
    pub const LEFT_MONO: Self = Self(1 << 0);
    pub const LEFT_RECT: Self = Self(1 << 1);
    pub const LEFT_COLOR: Self = Self(1 << 2);
    pub const LEFT_RECT_COLOR: Self = Self(1 << 3);
    pub const RIGHT_MONO: Self = Self(1 << 4);
    pub const RIGHT_RECT: Self = Self(1 << 5);
    pub const RIGHT_COLOR: Self = Self(1 << 6);
    pub const RIGHT_RECT_COLOR: Self = Self(1 << 7);
    pub const DISPARITY: Self = Self(1 << 8);
    pub const POINT_CLOUD: Self = Self(1 << 9);
    pub const POINT_CLOUD2: Self = Self(1 << 10);

    pub const LEFT_ALL: Self = Self(0x00F);
    pub const RIGHT_ALL: Self = Self(0x0F0);
    pub const STEREO_ALL: Self = Self(0x700);
    pub const ALL: Self = Self(0x7FF);

    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Adds the prerequisites of every requested output: a point cloud needs
    /// disparity and the left rectified color image, disparity needs both
    /// rectified images.
    pub fn expand(self) -> Self {
        let mut flags = self;
        if flags.intersects(Self::POINT_CLOUD | Self::POINT_CLOUD2) {
            flags |= Self::DISPARITY | Self::LEFT_RECT_COLOR;
        }
        if flags.contains(Self::DISPARITY) {
            flags |= Self::LEFT_RECT | Self::RIGHT_RECT;
        }
        flags
    }

    pub fn left(self) -> MonoFlags {
        MonoFlags::from_bits_truncate((self.0 & Self::LEFT_ALL.0) as u8)
    }

    pub fn right(self) -> MonoFlags {
        MonoFlags::from_bits_truncate(((self.0 & Self::RIGHT_ALL.0) >> 4) as u8)
    }
}

impl BitOr for OutputFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OutputFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for OutputFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_cloud_implies_disparity_and_color() {
        for cloud in [OutputFlags::POINT_CLOUD, OutputFlags::POINT_CLOUD2] {
            let flags = cloud.expand();
            assert!(flags.contains(OutputFlags::DISPARITY));
            assert!(flags.contains(OutputFlags::LEFT_RECT_COLOR));
            assert!(flags.contains(OutputFlags::LEFT_RECT | OutputFlags::RIGHT_RECT));
            assert!(!flags.contains(OutputFlags::RIGHT_RECT_COLOR));
        }
    }

    #[test]
    fn test_disparity_implies_rectified_pair() {
        let flags = OutputFlags::DISPARITY.expand();
        assert_eq!(
            flags,
            OutputFlags::DISPARITY | OutputFlags::LEFT_RECT | OutputFlags::RIGHT_RECT
        );
        assert_eq!(flags.left(), MonoFlags::RECT);
        assert_eq!(flags.right(), MonoFlags::RECT);
    }

    #[test]
    fn test_mono_only_is_unchanged() {
        let flags = OutputFlags::LEFT_MONO | OutputFlags::RIGHT_COLOR;
        assert_eq!(flags.expand(), flags);
        assert_eq!(flags.left(), MonoFlags::MONO);
        assert_eq!(flags.right(), MonoFlags::COLOR);
    }

    #[test]
    fn test_group_masks() {
        assert_eq!(OutputFlags::ALL, OutputFlags::LEFT_ALL | OutputFlags::RIGHT_ALL | OutputFlags::STEREO_ALL);
        assert_eq!(OutputFlags::ALL.left(), MonoFlags::ALL);
        assert_eq!(OutputFlags::ALL.right(), MonoFlags::ALL);
    }
}
