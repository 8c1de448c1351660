//! Point cloud types

/// 3-D point of a sparse cloud
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point32 {
    /// Right of the left camera center
    pub x: f32,
    /// Below the left camera center
    pub y: f32,
    /// Depth along the optical axis
    pub z: f32,
}

/// Named per-point attribute, parallel to [`SparsePointCloud::points`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelFloat32 {
    /// Channel name, e.g. `rgb`, `u` or `v`
    pub name: String,
    /// One value per point
    pub values: Vec<f32>,
}

impl ChannelFloat32 {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// Valid points only, in raster order, with `rgb`, `u` (source row) and `v`
/// (source column) channels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparsePointCloud {
    /// Valid points in raster order
    pub points: Vec<Point32>,
    /// Per-point attributes, ordered `rgb`, `u`, `v`
    pub channels: Vec<ChannelFloat32>,
}

impl SparsePointCloud {
    pub const RGB: &'static str = "rgb";
    pub const U: &'static str = "u";
    pub const V: &'static str = "v";

    pub fn channel(&self, name: &str) -> Option<&ChannelFloat32> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Storage type of a [`PointField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFieldType {
    /// 32-bit IEEE float, host byte order
    Float32,
}

impl PointFieldType {
    /// Bytes per element
    pub fn size(self) -> usize {
        match self {
            PointFieldType::Float32 => 4,
        }
    }
}

/// Describes one field of a [`StructuredPointCloud`] record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointField {
    /// Field name: `x`, `y`, `z` or `rgb`
    pub name: String,
    /// Byte offset inside the record
    pub offset: usize,
    /// Element type
    pub datatype: PointFieldType,
    /// Elements per record
    pub count: usize,
}

impl PointField {
    pub fn float32(name: &str, offset: usize) -> Self {
        Self {
            name: name.to_string(),
            offset,
            datatype: PointFieldType::Float32,
            count: 1,
        }
    }
}

/// One record of a [`StructuredPointCloud`], in host byte order
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointXyzRgb {
    /// Right of the left camera center, NaN for pixels without depth
    pub x: f32,
    /// Below the left camera center, NaN for pixels without depth
    pub y: f32,
    /// Depth along the optical axis, NaN for pixels without depth
    pub z: f32,
    /// Packed `0x00RRGGBB`, see [`pack_rgb`](crate::stereo_pipeline::points::pack_rgb)
    pub rgb: f32,
}

impl PointXyzRgb {
    pub const NAN: Self = Self {
        x: f32::NAN,
        y: f32::NAN,
        z: f32::NAN,
        rgb: f32::NAN,
    };
}

/// Row-major buffer with one fixed-size record per source pixel.
///
/// Pixels without depth are kept as all-NaN records, so `is_dense` is always false.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPointCloud {
    /// Rows, equal to the source image height
    pub height: usize,
    /// Records per row, equal to the source image width
    pub width: usize,
    /// Record layout
    pub fields: Vec<PointField>,
    /// Byte order of `data`, the host order
    pub is_bigendian: bool,
    /// Bytes per record
    pub point_step: usize,
    /// Bytes per row
    pub row_step: usize,
    /// Records, `row_step * height` bytes
    pub data: Vec<u8>,
    /// Always false: invalid pixels are kept as NaN records
    pub is_dense: bool,
}

impl StructuredPointCloud {
    pub const POINT_STEP: usize = std::mem::size_of::<PointXyzRgb>();

    /// Allocates a zeroed cloud with the x/y/z/rgb layout
    pub fn new(width: usize, height: usize) -> Self {
        let point_step = Self::POINT_STEP;
        let row_step = point_step * width;
        Self {
            height,
            width,
            fields: vec![
                PointField::float32("x", 0),
                PointField::float32("y", 4),
                PointField::float32("z", 8),
                PointField::float32("rgb", 12),
            ],
            is_bigendian: cfg!(target_endian = "big"),
            point_step,
            row_step,
            data: vec![0u8; row_step * height],
            is_dense: false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&PointField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Decodes the record at (row, col)
    pub fn point(&self, row: usize, col: usize) -> PointXyzRgb {
        let start = row * self.row_step + col * self.point_step;
        bytemuck::pod_read_unaligned(&self.data[start..start + self.point_step])
    }

    pub fn iter(&self) -> impl Iterator<Item = PointXyzRgb> + '_ {
        self.data
            .chunks_exact(self.point_step)
            .map(bytemuck::pod_read_unaligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout_matches_fields() {
        let cloud = StructuredPointCloud::new(3, 2);
        assert_eq!(cloud.point_step, 16);
        assert_eq!(cloud.row_step, 48);
        for (name, offset) in [("x", 0), ("y", 4), ("z", 8), ("rgb", 12)] {
            let field = cloud.field(name).unwrap();
            assert_eq!(field.offset, offset);
            assert_eq!(field.datatype, PointFieldType::Float32);
            assert_eq!(field.datatype.size(), 4);
            assert_eq!(field.count, 1);
        }
        assert!(!cloud.is_dense);
    }

    #[test]
    fn test_buffer_size_for_all_shapes() {
        for height in 0..5 {
            for width in 0..7 {
                let cloud = StructuredPointCloud::new(width, height);
                assert_eq!(cloud.data.len(), height * width * 16);
            }
        }
    }

    #[test]
    fn test_record_bytes_at_offsets() {
        let record = PointXyzRgb { x: 1.0, y: 2.0, z: 3.0, rgb: f32::from_bits(0x00AB_CDEF) };
        let bytes = bytemuck::bytes_of(&record);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &2.0f32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &3.0f32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &0x00AB_CDEFu32.to_ne_bytes());
    }
}
