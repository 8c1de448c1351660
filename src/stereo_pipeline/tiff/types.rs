/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    Lzw,
    /// Deflate at the balanced level
    Deflate,
}

impl TiffCompression {
    pub(crate) fn to_encoder(self) -> tiff::encoder::Compression {
        match self {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Balanced,
            ),
        }
    }
}
