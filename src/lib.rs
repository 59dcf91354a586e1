//! MPEG-2 Video motion-compensated prediction (ISO/IEC 13818-2 section 7.6).
//!
//! This crate implements the pixel-level algebra of MPEG-2 motion
//! compensation: given a macroblock's motion vectors, motion_type, and
//! spatial/temporal weighting, it forms the forward and/or backward
//! predictions and writes them into a destination frame's luma and chroma
//! planes. Bitstream parsing (picture headers, macroblock headers, motion
//! vector decoding) is a host decoder's job, not this crate's — see
//! [`dispatch::form_predictions`] for the boundary.
//!
//! # Example
//!
//! ```ignore
//! use mpeg2_predict::chroma::ChromaFormat;
//! use mpeg2_predict::context::DecoderContext;
//! use mpeg2_predict::dispatch::form_predictions;
//! use mpeg2_predict::motion::{MacroblockMotion, MacroblockMotionFlags, MotionType, MotionVectorSet, FieldSelect, StwType};
//! use mpeg2_predict::picture::{PictureStructure, PictureType};
//! use mpeg2_predict::plane::Frame;
//!
//! let ctx = DecoderContext {
//!     picture_structure: PictureStructure::Frame,
//!     picture_coding_type: PictureType::P,
//!     second_field: false,
//!     chroma_format: ChromaFormat::Yuv420,
//!     coded_picture_width: 352,
//!     top_field_first: true,
//! };
//!
//! let mb = MacroblockMotion {
//!     bx: 0,
//!     by: 0,
//!     flags: MacroblockMotionFlags { forward: true, backward: false },
//!     motion_type: MotionType::Frame,
//!     pmv: MotionVectorSet::default(),
//!     field_select: FieldSelect::default(),
//!     dmvector: [0, 0],
//!     stw: StwType::default(),
//! };
//!
//! # fn get_frames() -> (Frame, Frame, Frame) { unimplemented!() }
//! let (mut current, forward_reference, backward_reference) = get_frames();
//! if let Some(warning) = form_predictions(&ctx, &mb, &mut current, &forward_reference, &backward_reference) {
//!     eprintln!("{:?}", warning);
//! }
//! ```

pub mod chroma;
pub mod context;
pub mod dispatch;
pub mod dual_prime;
pub mod error;
pub mod motion;
pub mod picture;
pub mod plane;
pub mod predict;
pub mod trace;

pub use chroma::ChromaFormat;
pub use context::DecoderContext;
pub use dispatch::{form_predictions, DecodeWarning};
pub use dual_prime::dual_prime_arithmetic;
pub use error::{Mpeg2Error, Result};
pub use motion::{
    Direction, FieldSelect, MacroblockMotion, MacroblockMotionFlags, MotionType, MotionVectorSet,
    StwType,
};
pub use picture::{PictureStructure, PictureType};
pub use plane::{Frame, Plane};
pub use predict::form_prediction;
