//! The ambient per-picture state the dispatcher needs (spec §9's
//! recommendation to gather the reference decoder's process-wide globals
//! into an explicit, caller-owned value instead).

use serde::{Deserialize, Serialize};

use crate::chroma::ChromaFormat;
use crate::picture::{PictureStructure, PictureType};

/// Picture-level state the dispatcher consults but never mutates.
///
/// Owned by the caller and rebuilt (or updated) once per picture; frame-role
/// reassignment at picture boundaries — which reference is "forward" vs
/// "backward" next time — is entirely the caller's responsibility (spec §5).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecoderContext {
    pub picture_structure: PictureStructure,
    pub picture_coding_type: PictureType,
    /// True iff this is the second field of a field-picture pair.
    pub second_field: bool,
    pub chroma_format: ChromaFormat,
    pub coded_picture_width: usize,
    /// Picture coding extension's `top_field_first`, needed only for the
    /// dual-prime derivation (§7.6.3.6).
    pub top_field_first: bool,
}

impl DecoderContext {
    /// `currentfield` per spec §4.1: 1 for a bottom field picture, 0 otherwise.
    pub fn current_field(&self) -> u8 {
        self.picture_structure.current_field()
    }
}
