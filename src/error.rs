//! Error types for the motion-compensated prediction engine.
//!
//! The prediction entry point itself never returns a `Result` (see the
//! [`crate::dispatch`] module docs): a decode proceeds best-effort, and an
//! invalid motion_type is surfaced as a [`crate::dispatch::DecodeWarning`], not
//! an error. `Mpeg2Error` exists for the one real fallible boundary this
//! crate has: constructing a [`crate::plane::Plane`] or
//! [`crate::plane::Frame`] from caller-supplied sample buffers.

use thiserror::Error;

/// Errors raised at the plane/frame construction boundary.
#[derive(Debug, Error)]
pub enum Mpeg2Error {
    /// A plane's backing buffer length did not match `width * height`.
    #[error("plane size mismatch: {width}x{height} requires {expected} samples, got {got}")]
    PlaneSizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    /// Chroma dimensions were inconsistent with the declared chroma format.
    #[error(
        "invalid chroma dimensions for {format:?}: luma {luma_width}x{luma_height}, chroma {chroma_width}x{chroma_height}"
    )]
    InvalidChromaDimensions {
        format: crate::chroma::ChromaFormat,
        luma_width: usize,
        luma_height: usize,
        chroma_width: usize,
        chroma_height: usize,
    },
}

/// Result type alias for plane/frame construction.
pub type Result<T> = std::result::Result<T, Mpeg2Error>;
