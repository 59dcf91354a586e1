//! The pixel predictor (spec §4.3) and its per-plane dispatch (spec §4.2).
//!
//! This is a direct, bounds-checked transliteration of
//! `original_source/tools/mpeg2dec/recon.c`'s `form_component_prediction`
//! and `form_prediction`: same address derivation, same four half-pel
//! interpolation cases, same accumulate rounding. The only departure from
//! the reference is that addressing is done with slice indices instead of
//! raw pointer arithmetic.

use crate::chroma::ChromaFormat;
use crate::plane::Frame;

/// Forms the luma and chroma predictions for one sub-prediction (spec §4.2):
/// one call per `{reference, source-field, destination-field, vector}`
/// combination the dispatcher emits. Invokes the pixel predictor once per
/// plane (Y, then Cb, Cr), halving the chroma geometry per `chroma_format`.
#[allow(clippy::too_many_arguments)]
pub fn form_prediction(
    chroma_format: ChromaFormat,
    src: &Frame,
    sfield: u8,
    dst: &mut Frame,
    dfield: u8,
    lx: usize,
    lx2: usize,
    w: usize,
    h: usize,
    x: usize,
    y: usize,
    dx: i32,
    dy: i32,
    average: bool,
) {
    form_component_prediction(src.y.as_slice(), dst.y.as_mut_slice(), sfield, dfield, lx, lx2, w, h, x, y, dx, dy, average);

    let (mut lx, mut lx2, mut w, mut x, mut dx) = (lx, lx2, w, x, dx);
    if chroma_format != ChromaFormat::Yuv444 {
        lx >>= 1;
        lx2 >>= 1;
        w >>= 1;
        x >>= 1;
        // truncation toward zero, not arithmetic shift: normative (spec §4.2).
        dx /= 2;
    }

    let (mut h, mut y, mut dy) = (h, y, dy);
    if chroma_format == ChromaFormat::Yuv420 {
        h >>= 1;
        y >>= 1;
        dy /= 2;
    }

    form_component_prediction(src.cb.as_slice(), dst.cb.as_mut_slice(), sfield, dfield, lx, lx2, w, h, x, y, dx, dy, average);
    form_component_prediction(src.cr.as_slice(), dst.cr.as_mut_slice(), sfield, dfield, lx, lx2, w, h, x, y, dx, dy, average);
}

/// The leaf pixel predictor (spec §4.3): reads one block from `src`,
/// half-pel-interpolates it according to `(dx, dy)`'s low bits, and writes
/// (or averaging-accumulates into) `dst`.
///
/// `lx` is the raster-line increment within a field; `lx2` is the stride
/// used to walk from one row of this block to the next — equal to `lx` for
/// frame-layout accesses, `2*lx` for field-layout accesses into an
/// interleaved frame buffer. `sfield`/`dfield` select the second interleaved
/// field by offsetting into `src`/`dst` by `lx2/2` samples, mirroring the
/// reference's `src[0]+(sfield?lx2>>1:0)` pointer adjustment. Callers are
/// trusted to supply `lx2` consistent with the field-select contract
/// (spec §9's second Open Question) — there is no defensive check against a
/// `lx2` that isn't exactly twice the field line stride.
#[allow(clippy::too_many_arguments)]
pub fn form_component_prediction(
    src: &[u8],
    dst: &mut [u8],
    sfield: u8,
    dfield: u8,
    lx: usize,
    lx2: usize,
    w: usize,
    h: usize,
    x: usize,
    y: usize,
    dx: i32,
    dy: i32,
    average: bool,
) {
    let src_field_offset = if sfield != 0 { lx2 >> 1 } else { 0 };
    let dst_field_offset = if dfield != 0 { lx2 >> 1 } else { 0 };
    debug_assert!(src_field_offset < src.len() || src.is_empty());
    debug_assert!(dst_field_offset < dst.len() || dst.is_empty());

    // half-pel scaling for integer vectors: arithmetic shift, floor for negatives.
    let xint = dx >> 1;
    let yint = dy >> 1;
    // half-pel flags: LSB of the half-pel coordinates.
    let xh = dx & 1;
    let yh = dy & 1;

    let s_base = src_field_offset as i64
        + (lx as i64) * (y as i64 + yint as i64)
        + (x as i64 + xint as i64);
    let d_base = dst_field_offset as i64 + (lx as i64) * (y as i64) + (x as i64);

    match (xh != 0, yh != 0) {
        (false, false) => run(src, dst, s_base, d_base, lx2, w, h, average, |s, i| s[i] as u32),
        (false, true) => run(src, dst, s_base, d_base, lx2, w, h, average, move |s, i| {
            (s[i] as u32 + s[i + lx] as u32 + 1) >> 1
        }),
        (true, false) => run(src, dst, s_base, d_base, lx2, w, h, average, |s, i| {
            (s[i] as u32 + s[i + 1] as u32 + 1) >> 1
        }),
        (true, true) => run(src, dst, s_base, d_base, lx2, w, h, average, move |s, i| {
            (s[i] as u32 + s[i + 1] as u32 + s[i + lx] as u32 + s[i + lx + 1] as u32 + 2) >> 2
        }),
    }
}

/// Walk `h` rows of `w` columns, computing each predicted sample with `pel`
/// and either writing it directly or averaging-accumulating it into `dst`
/// (spec §4.3's accumulate semantics: `(d[i] + p(i) [+1]) >> 1`, upward
/// rounding).
fn run(
    src: &[u8],
    dst: &mut [u8],
    s_base: i64,
    d_base: i64,
    lx2: usize,
    w: usize,
    h: usize,
    average: bool,
    pel: impl Fn(&[u8], usize) -> u32,
) {
    for row in 0..h {
        let s_row = (s_base + (row * lx2) as i64) as usize;
        let d_row = (d_base + (row * lx2) as i64) as usize;
        let s = &src[s_row..];
        let d = &mut dst[d_row..d_row + w];
        for i in 0..w {
            let p = pel(s, i);
            if average {
                let v = d[i] as u32 + p;
                // samples are non-negative, so `(v>=0?1:0)` is always 1.
                d[i] = ((v + 1) >> 1) as u8;
            } else {
                d[i] = p as u8;
            }
        }
    }
}
