//! Point cloud construction
//!
//! Both cloud builders walk the same [`DensePointGrid`] through one shared
//! traversal, so the validity rule and the color packing are applied
//! identically and the set of valid pixels always agrees between them.

pub mod color;
pub mod grid;
mod sparse;
mod structured;
mod traversal;
pub mod types;
pub mod validity;

pub use color::{ColorPacker, pack_rgb, unpack_rgb};
pub use grid::DensePointGrid;
pub use sparse::build_sparse_cloud;
pub use structured::build_structured_cloud;
pub use types::{
    ChannelFloat32, Point32, PointField, PointFieldType, PointXyzRgb, SparsePointCloud,
    StructuredPointCloud,
};
pub use validity::is_valid_point;
