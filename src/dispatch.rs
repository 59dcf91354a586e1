//! The macroblock dispatcher (spec §4.1): `form_predictions`, the crate's
//! single entry point. Selects which prediction variant to invoke, how many
//! times, against which reference, which fields, and whether to
//! averaging-accumulate, then calls [`crate::predict::form_prediction`] for
//! each sub-prediction it decides on.
//!
//! Grounded directly on `original_source/tools/mpeg2dec/recon.c`'s
//! `form_predictions`: the branch structure below follows it line for line,
//! case for case; see SPEC_FULL.md §9 for the one behavioral change (invalid
//! motion_type skips the whole macroblock instead of falling through).

use serde::{Deserialize, Serialize};

use crate::context::DecoderContext;
use crate::dual_prime::dual_prime_arithmetic;
use crate::motion::{Direction, MacroblockMotion, MotionType};
use crate::picture::{PictureStructure, PictureType};
use crate::plane::Frame;
use crate::predict::form_prediction;
use crate::trace::{DirectionTrace, SubPredictionTrace};

/// A recoverable condition the dispatcher surfaces instead of raising an
/// error (spec §7): the core never aborts a decode, it flags it as suspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeWarning {
    /// `motion_type` was not one of the values valid for the current
    /// `picture_structure`/direction combination. No plane writes were
    /// performed for this macroblock (see SPEC_FULL.md §9).
    InvalidMotionType {
        motion_type: MotionType,
        picture_structure: PictureStructure,
    },
}

/// Forms the forward and/or backward motion-compensated predictions for one
/// macroblock and writes them into `current`'s three planes.
///
/// Returns `Some(warning)` (and performs no writes at all) if `mb.motion_type`
/// is not valid for `ctx.picture_structure`; see SPEC_FULL.md §9.
pub fn form_predictions(
    ctx: &DecoderContext,
    mb: &MacroblockMotion,
    current: &mut Frame,
    forward_reference: &Frame,
    backward_reference: &Frame,
) -> Option<DecodeWarning> {
    let forward_runs = mb.flags.forward || ctx.picture_coding_type == PictureType::P;

    if let Some(warning) = validate(ctx, mb, forward_runs) {
        tracing::warn!(
            motion_type = ?mb.motion_type,
            picture_structure = ?ctx.picture_structure,
            bx = mb.bx,
            by = mb.by,
            "invalid motion_type; skipping macroblock"
        );
        return Some(warning);
    }

    let mut stwtop = mb.stw.stwtop();
    let mut stwbot = mb.stw.stwbot();

    if forward_runs {
        match ctx.picture_structure {
            PictureStructure::Frame => {
                frame_forward(ctx, mb, current, forward_reference, stwtop, stwbot)
            }
            _ => field_forward(
                ctx,
                mb,
                current,
                forward_reference,
                backward_reference,
                stwtop,
            ),
        }
        stwtop = 1;
        stwbot = 1;
    }

    if mb.flags.backward {
        match ctx.picture_structure {
            PictureStructure::Frame => {
                frame_backward(ctx, mb, current, backward_reference, stwtop, stwbot)
            }
            _ => field_backward(ctx, mb, current, backward_reference, stwtop),
        }
    }

    None
}

fn validate(ctx: &DecoderContext, mb: &MacroblockMotion, forward_runs: bool) -> Option<DecodeWarning> {
    if forward_runs && mb.flags.forward {
        let ok = match ctx.picture_structure {
            PictureStructure::Frame => matches!(
                mb.motion_type,
                MotionType::Frame | MotionType::Field | MotionType::DualPrime
            ),
            PictureStructure::TopField | PictureStructure::BottomField => matches!(
                mb.motion_type,
                MotionType::Field | MotionType::Field16x8 | MotionType::DualPrime
            ),
            PictureStructure::Reserved => false,
        };
        if !ok {
            return Some(DecodeWarning::InvalidMotionType {
                motion_type: mb.motion_type,
                picture_structure: ctx.picture_structure,
            });
        }
    }

    if mb.flags.backward {
        let ok = match ctx.picture_structure {
            PictureStructure::Frame => true, // the reference never flags invalid here (see SPEC_FULL.md)
            PictureStructure::TopField | PictureStructure::BottomField => {
                matches!(mb.motion_type, MotionType::Field | MotionType::Field16x8)
            }
            PictureStructure::Reserved => false,
        };
        if !ok {
            return Some(DecodeWarning::InvalidMotionType {
                motion_type: mb.motion_type,
                picture_structure: ctx.picture_structure,
            });
        }
    }

    None
}

fn average(stw: u8) -> bool {
    stw != 0
}

/// FRAME picture, forward pass (spec §4.1's FRAME table).
fn frame_forward(
    ctx: &DecoderContext,
    mb: &MacroblockMotion,
    current: &mut Frame,
    forward_reference: &Frame,
    stwtop: u8,
    stwbot: u8,
) {
    let w = ctx.coded_picture_width;
    let (mvx, mvy) = mb.pmv.get(0, Direction::Forward);

    if mb.motion_type == MotionType::Frame || !mb.flags.forward {
        let mut t = SubPredictionTrace {
            dst_field: 0,
            ..Default::default()
        };
        if stwtop < 2 {
            form_prediction(
                ctx.chroma_format,
                forward_reference,
                0,
                current,
                0,
                w,
                w << 1,
                16,
                8,
                mb.bx,
                mb.by,
                mvx,
                mvy,
                average(stwtop),
            );
            t.forward = DirectionTrace::some(0, mvx, mvy);
        }
        t.log("MC_FRAME");

        let mut t2 = SubPredictionTrace {
            dst_field: 1,
            ..Default::default()
        };
        if stwbot < 2 {
            form_prediction(
                ctx.chroma_format,
                forward_reference,
                1,
                current,
                1,
                w,
                w << 1,
                16,
                8,
                mb.bx,
                mb.by,
                mvx,
                mvy,
                average(stwbot),
            );
            t2.forward = DirectionTrace::some(1, mvx, mvy);
        }
        t2.log("MC_FRAME");
    } else if mb.motion_type == MotionType::Field {
        frame_field_halves(
            ctx,
            forward_reference,
            current,
            mb.bx,
            mb.by,
            mb.field_select.get(0, Direction::Forward),
            mb.pmv.get(0, Direction::Forward),
            mb.field_select.get(1, Direction::Forward),
            mb.pmv.get(1, Direction::Forward),
            stwtop,
            stwbot,
            "MC_FIELD",
        );
    } else {
        // MC_DMV
        let dmv = dual_prime_arithmetic(mb.dmvector, mvx, mvy >> 1, ctx.top_field_first);
        frame_dual_prime(
            ctx,
            forward_reference,
            current,
            mb.bx,
            mb.by,
            mvx,
            mvy >> 1,
            dmv,
            stwtop,
            stwbot,
        );
    }
}

/// FRAME picture, field-based (MC_FIELD) prediction shared by forward and
/// backward passes: top half from one field-select/vector pair, bottom half
/// from a second, independent pair.
#[allow(clippy::too_many_arguments)]
fn frame_field_halves(
    ctx: &DecoderContext,
    reference: &Frame,
    current: &mut Frame,
    bx: usize,
    by: usize,
    top_field_select: u8,
    top_mv: (i32, i32),
    bot_field_select: u8,
    bot_mv: (i32, i32),
    stwtop: u8,
    stwbot: u8,
    mode: &'static str,
) {
    let w = ctx.coded_picture_width;

    let mut t = SubPredictionTrace {
        dst_field: 0,
        ..Default::default()
    };
    if stwtop < 2 {
        form_prediction(
            ctx.chroma_format,
            reference,
            top_field_select,
            current,
            0,
            w << 1,
            w << 1,
            16,
            8,
            bx,
            by >> 1,
            top_mv.0,
            top_mv.1 >> 1,
            average(stwtop),
        );
        t.forward = DirectionTrace::some(top_field_select, top_mv.0, top_mv.1 >> 1);
    }
    t.log(mode);

    let mut t2 = SubPredictionTrace {
        dst_field: 1,
        ..Default::default()
    };
    if stwbot < 2 {
        form_prediction(
            ctx.chroma_format,
            reference,
            bot_field_select,
            current,
            1,
            w << 1,
            w << 1,
            16,
            8,
            bx,
            by >> 1,
            bot_mv.0,
            bot_mv.1 >> 1,
            average(stwbot),
        );
        t2.forward = DirectionTrace::some(bot_field_select, bot_mv.0, bot_mv.1 >> 1);
    }
    t2.log(mode);
}

/// FRAME picture, MC_DMV prediction: seed each destination field from the
/// same-parity source field, then accumulate from the opposite-parity field
/// using the derived vector.
#[allow(clippy::too_many_arguments)]
fn frame_dual_prime(
    ctx: &DecoderContext,
    reference: &Frame,
    current: &mut Frame,
    bx: usize,
    by: usize,
    mvx: i32,
    mvy_halved: i32,
    dmv: [(i32, i32); 2],
    stwtop: u8,
    stwbot: u8,
) {
    let w = ctx.coded_picture_width;

    let mut t = SubPredictionTrace {
        dst_field: 0,
        ..Default::default()
    };
    if stwtop < 2 {
        form_prediction(
            ctx.chroma_format,
            reference,
            0,
            current,
            0,
            w << 1,
            w << 1,
            16,
            8,
            bx,
            by >> 1,
            mvx,
            mvy_halved,
            false,
        );
        form_prediction(
            ctx.chroma_format,
            reference,
            1,
            current,
            0,
            w << 1,
            w << 1,
            16,
            8,
            bx,
            by >> 1,
            dmv[0].0,
            dmv[0].1,
            true,
        );
        t.forward = DirectionTrace::some(0, mvx, mvy_halved);
        t.backward = DirectionTrace::some(1, dmv[0].0, dmv[0].1);
    }
    t.log("MC_DMV");

    let mut t2 = SubPredictionTrace {
        dst_field: 1,
        ..Default::default()
    };
    if stwbot < 2 {
        form_prediction(
            ctx.chroma_format,
            reference,
            1,
            current,
            1,
            w << 1,
            w << 1,
            16,
            8,
            bx,
            by >> 1,
            mvx,
            mvy_halved,
            false,
        );
        form_prediction(
            ctx.chroma_format,
            reference,
            0,
            current,
            1,
            w << 1,
            w << 1,
            16,
            8,
            bx,
            by >> 1,
            dmv[1].0,
            dmv[1].1,
            true,
        );
        t2.forward = DirectionTrace::some(1, mvx, mvy_halved);
        t2.backward = DirectionTrace::some(0, dmv[1].0, dmv[1].1);
    }
    t2.log("MC_DMV");
}

/// FRAME picture, backward pass.
fn frame_backward(
    ctx: &DecoderContext,
    mb: &MacroblockMotion,
    current: &mut Frame,
    backward_reference: &Frame,
    stwtop: u8,
    stwbot: u8,
) {
    let w = ctx.coded_picture_width;
    let (mvx, mvy) = mb.pmv.get(0, Direction::Backward);

    if mb.motion_type == MotionType::Frame {
        let mut t = SubPredictionTrace {
            dst_field: 0,
            ..Default::default()
        };
        if stwtop < 2 {
            form_prediction(
                ctx.chroma_format,
                backward_reference,
                0,
                current,
                0,
                w,
                w << 1,
                16,
                8,
                mb.bx,
                mb.by,
                mvx,
                mvy,
                average(stwtop),
            );
            t.backward = DirectionTrace::some(0, mvx, mvy);
        }
        t.log("MC_FRAME");

        let mut t2 = SubPredictionTrace {
            dst_field: 1,
            ..Default::default()
        };
        if stwbot < 2 {
            form_prediction(
                ctx.chroma_format,
                backward_reference,
                1,
                current,
                1,
                w,
                w << 1,
                16,
                8,
                mb.bx,
                mb.by,
                mvx,
                mvy,
                average(stwbot),
            );
            t2.backward = DirectionTrace::some(1, mvx, mvy);
        }
        t2.log("MC_FRAME");
    } else {
        // field-based prediction; any non-MC_FRAME motion_type lands here,
        // matching the reference (MC_DMV never occurs with backward motion).
        frame_field_halves(
            ctx,
            backward_reference,
            current,
            mb.bx,
            mb.by,
            mb.field_select.get(0, Direction::Backward),
            mb.pmv.get(0, Direction::Backward),
            mb.field_select.get(1, Direction::Backward),
            mb.pmv.get(1, Direction::Backward),
            stwtop,
            stwbot,
            "MC_FIELD",
        );
    }
}

/// FIELD picture, forward pass (spec §4.1's FIELD table).
fn field_forward(
    ctx: &DecoderContext,
    mb: &MacroblockMotion,
    current: &mut Frame,
    forward_reference: &Frame,
    backward_reference: &Frame,
    stwtop: u8,
) {
    let w = ctx.coded_picture_width;
    let currentfield = ctx.current_field();

    let predframe = |field_select: u8| -> &Frame {
        if ctx.picture_coding_type == PictureType::P
            && ctx.second_field
            && currentfield != field_select
        {
            backward_reference
        } else {
            forward_reference
        }
    };

    if mb.motion_type == MotionType::Field || !mb.flags.forward {
        let fs = mb.field_select.get(0, Direction::Forward);
        let (mvx, mvy) = mb.pmv.get(0, Direction::Forward);
        let mut t = SubPredictionTrace {
            dst_field: currentfield,
            ..Default::default()
        };
        if stwtop < 2 {
            form_prediction(
                ctx.chroma_format,
                predframe(fs),
                fs,
                current,
                0,
                w << 1,
                w << 1,
                16,
                16,
                mb.bx,
                mb.by,
                mvx,
                mvy,
                average(stwtop),
            );
            t.forward = DirectionTrace::some(fs, mvx, mvy);
        }
        t.log("MC_FIELD");
    } else if mb.motion_type == MotionType::Field16x8 {
        let mut t = SubPredictionTrace {
            dst_field: currentfield,
            ..Default::default()
        };
        if stwtop < 2 {
            let fs0 = mb.field_select.get(0, Direction::Forward);
            let (mvx0, mvy0) = mb.pmv.get(0, Direction::Forward);
            form_prediction(
                ctx.chroma_format,
                predframe(fs0),
                fs0,
                current,
                0,
                w << 1,
                w << 1,
                16,
                8,
                mb.bx,
                mb.by,
                mvx0,
                mvy0,
                average(stwtop),
            );

            let fs1 = mb.field_select.get(1, Direction::Forward);
            let (mvx1, mvy1) = mb.pmv.get(1, Direction::Forward);
            form_prediction(
                ctx.chroma_format,
                predframe(fs1),
                fs1,
                current,
                0,
                w << 1,
                w << 1,
                16,
                8,
                mb.bx,
                mb.by + 8,
                mvx1,
                mvy1,
                average(stwtop),
            );

            t.forward = DirectionTrace::some(fs0, mvx0, mvy0);
            t.backward = DirectionTrace::some(fs1, mvx1, mvy1);
        }
        t.log("MC_16X8");
    } else {
        // MC_DMV
        let predframe = if ctx.second_field {
            backward_reference
        } else {
            forward_reference
        };
        let (mvx, mvy) = mb.pmv.get(0, Direction::Forward);
        let dmv = dual_prime_arithmetic(mb.dmvector, mvx, mvy, ctx.top_field_first);

        form_prediction(
            ctx.chroma_format,
            forward_reference,
            currentfield,
            current,
            0,
            w << 1,
            w << 1,
            16,
            16,
            mb.bx,
            mb.by,
            mvx,
            mvy,
            false,
        );
        let opposite_field = 1 - currentfield;
        form_prediction(
            ctx.chroma_format,
            predframe,
            opposite_field,
            current,
            0,
            w << 1,
            w << 1,
            16,
            16,
            mb.bx,
            mb.by,
            dmv[0].0,
            dmv[0].1,
            true,
        );

        let t = SubPredictionTrace {
            dst_field: currentfield,
            forward: DirectionTrace::some(currentfield, mvx, mvy),
            backward: DirectionTrace::some(opposite_field, dmv[0].0, dmv[0].1),
        };
        t.log("MC_DMV");
    }
}

/// FIELD picture, backward pass.
fn field_backward(
    ctx: &DecoderContext,
    mb: &MacroblockMotion,
    current: &mut Frame,
    backward_reference: &Frame,
    stwtop: u8,
) {
    let w = ctx.coded_picture_width;
    let currentfield = ctx.current_field();

    if mb.motion_type == MotionType::Field {
        let fs = mb.field_select.get(0, Direction::Backward);
        let (mvx, mvy) = mb.pmv.get(0, Direction::Backward);
        form_prediction(
            ctx.chroma_format,
            backward_reference,
            fs,
            current,
            0,
            w << 1,
            w << 1,
            16,
            16,
            mb.bx,
            mb.by,
            mvx,
            mvy,
            average(stwtop),
        );
        let t = SubPredictionTrace {
            dst_field: currentfield,
            backward: DirectionTrace::some(fs, mvx, mvy),
            ..Default::default()
        };
        t.log("MC_FIELD");
    } else {
        // MC_16X8 (the only other value `validate` admits here)
        let fs0 = mb.field_select.get(0, Direction::Backward);
        let (mvx0, mvy0) = mb.pmv.get(0, Direction::Backward);
        form_prediction(
            ctx.chroma_format,
            backward_reference,
            fs0,
            current,
            0,
            w << 1,
            w << 1,
            16,
            8,
            mb.bx,
            mb.by,
            mvx0,
            mvy0,
            average(stwtop),
        );

        let fs1 = mb.field_select.get(1, Direction::Backward);
        let (mvx1, mvy1) = mb.pmv.get(1, Direction::Backward);
        form_prediction(
            ctx.chroma_format,
            backward_reference,
            fs1,
            current,
            0,
            w << 1,
            w << 1,
            16,
            8,
            mb.bx,
            mb.by + 8,
            mvx1,
            mvy1,
            average(stwtop),
        );

        let t = SubPredictionTrace {
            dst_field: currentfield,
            backward: DirectionTrace::some(fs0, mvx0, mvy0),
            ..Default::default()
        };
        t.log("MC_16X8");
        let t2 = SubPredictionTrace {
            dst_field: currentfield,
            backward: DirectionTrace::some(fs1, mvx1, mvy1),
            ..Default::default()
        };
        t2.log("MC_16X8");
    }
}
