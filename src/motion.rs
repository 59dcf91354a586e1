//! Per-macroblock motion metadata (spec §3, §4.1): the motion vector set,
//! field selects, the dual-prime differential, macroblock motion flags, the
//! motion_type selector, and the spatial/temporal weighting decomposition.

use serde::{Deserialize, Serialize};

/// Prediction direction: forward (temporal anchor before this picture) or
/// backward (temporal anchor after this picture, B-pictures only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
        }
    }
}

/// `motion_type`, interpreted relative to `picture_structure` (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionType {
    /// Frame-based prediction (FRAME pictures) or single 16x16 field
    /// prediction (FIELD pictures' `MC_FIELD`, one name, two table rows).
    Frame,
    /// Field-based prediction, split top/bottom halves (FRAME pictures).
    Field,
    /// Two independent 16x8 sub-blocks (FIELD pictures only).
    Field16x8,
    /// Dual-prime: one transmitted vector plus a derived opposite-parity one.
    DualPrime,
}

/// `PMV[r][s][t]`: r selects first/second vector (16x8, dual-prime), s
/// selects forward/backward, t selects horizontal/vertical. Units are
/// half-pel, cartesian (spec §3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionVectorSet {
    /// `pmv[r][s] = (x, y)`
    pmv: [[(i32, i32); 2]; 2],
}

impl MotionVectorSet {
    pub fn new(pmv: [[(i32, i32); 2]; 2]) -> Self {
        Self { pmv }
    }

    /// `PMV[r][dir]`.
    pub fn get(&self, r: usize, dir: Direction) -> (i32, i32) {
        self.pmv[r][dir.index()]
    }
}

/// `motion_vertical_field_select[r][s] in {0,1}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelect {
    select: [[u8; 2]; 2],
}

impl FieldSelect {
    pub fn new(select: [[u8; 2]; 2]) -> Self {
        Self { select }
    }

    pub fn get(&self, r: usize, dir: Direction) -> u8 {
        self.select[r][dir.index()]
    }
}

/// Which directions are present for this macroblock (spec §4.1's
/// `MACROBLOCK_MOTION_FORWARD`/`MACROBLOCK_MOTION_BACKWARD` flags).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroblockMotionFlags {
    pub forward: bool,
    pub backward: bool,
}

/// Everything [`crate::dispatch::form_predictions`] needs about one
/// macroblock's motion coding (spec §4.1's input list).
#[derive(Debug, Clone, Copy)]
pub struct MacroblockMotion {
    /// Top-left pixel position of this macroblock in the current frame's
    /// luma raster.
    pub bx: usize,
    pub by: usize,
    pub flags: MacroblockMotionFlags,
    pub motion_type: MotionType,
    pub pmv: MotionVectorSet,
    pub field_select: FieldSelect,
    pub dmvector: [i32; 2],
    pub stw: StwType,
}

/// `stwtype in [0,8]`, decomposed into per-half weighting selectors
/// (spec §3): 0 temporal, 1 spatial+temporal averaged, 2 spatial-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StwType(pub u8);

impl StwType {
    /// 0 = temporal, 1 = (spatial + temporal) / 2, 2 = spatial only.
    pub fn stwtop(self) -> u8 {
        self.0 % 3
    }

    pub fn stwbot(self) -> u8 {
        self.0 / 3
    }
}

impl Default for StwType {
    fn default() -> Self {
        StwType(0)
    }
}
