//! Picture-level types consumed from the bitstream-parsing collaborator.
//!
//! Parsing the picture header and picture coding extension out of the
//! bitstream is out of scope for this crate (see spec §1/§6): a host decoder
//! does that and hands these values to [`crate::dispatch::form_predictions`].
//! What belongs here is the small set of enums the data model (spec §3)
//! defines in terms of.

use serde::{Deserialize, Serialize};

/// Picture coding type (I, P, B, D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PictureType {
    /// Forbidden
    Forbidden = 0,
    /// I-picture (intra)
    #[default]
    I = 1,
    /// P-picture (predictive)
    P = 2,
    /// B-picture (bi-directional)
    B = 3,
    /// D-picture (DC intra-coded)
    D = 4,
}

impl PictureType {
    /// Create from raw value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => PictureType::Forbidden,
            1 => PictureType::I,
            2 => PictureType::P,
            3 => PictureType::B,
            4 => PictureType::D,
            _ => PictureType::Forbidden,
        }
    }

    /// Check if intra-coded (I or D).
    pub fn is_intra(&self) -> bool {
        matches!(self, PictureType::I | PictureType::D)
    }
}

/// Picture structure (frame or field), ISO/IEC 13818-2 `picture_structure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PictureStructure {
    /// Reserved
    Reserved = 0,
    /// Top field
    TopField = 1,
    /// Bottom field
    BottomField = 2,
    /// Frame
    #[default]
    Frame = 3,
}

impl PictureStructure {
    /// Create from raw value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => PictureStructure::Reserved,
            1 => PictureStructure::TopField,
            2 => PictureStructure::BottomField,
            3 => PictureStructure::Frame,
            _ => PictureStructure::Reserved,
        }
    }

    /// `currentfield` per spec §4.1: 1 for a bottom field picture, 0 otherwise.
    pub fn current_field(&self) -> u8 {
        (*self == PictureStructure::BottomField) as u8
    }
}
