//! Chroma subsampling format and the luma-to-chroma dimension relationship.

use serde::{Deserialize, Serialize};

/// Chroma subsampling format, ISO/IEC 13818-2 `chroma_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChromaFormat {
    /// Reserved
    Reserved = 0,
    /// 4:2:0 - both chroma dimensions halved relative to luma.
    #[default]
    Yuv420 = 1,
    /// 4:2:2 - chroma width halved, height equal to luma.
    Yuv422 = 2,
    /// 4:4:4 - chroma dimensions equal to luma.
    Yuv444 = 3,
}

impl ChromaFormat {
    /// Create from raw value. An out-of-range code defaults to 4:2:0, the
    /// overwhelmingly common case, matching how the reference decoder treats
    /// a malformed `chroma_format` field.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ChromaFormat::Yuv420,
            2 => ChromaFormat::Yuv422,
            3 => ChromaFormat::Yuv444,
            0 => ChromaFormat::Reserved,
            _ => ChromaFormat::Yuv420,
        }
    }

    /// Chroma plane dimensions for a given luma plane size (spec §3).
    pub fn chroma_dimensions(&self, luma_width: usize, luma_height: usize) -> (usize, usize) {
        match self {
            ChromaFormat::Yuv420 => (luma_width / 2, luma_height / 2),
            ChromaFormat::Yuv422 => (luma_width / 2, luma_height),
            ChromaFormat::Yuv444 | ChromaFormat::Reserved => (luma_width, luma_height),
        }
    }
}
