//! Dual-prime derived motion vector arithmetic, ISO/IEC 13818-2 §7.6.3.6.
//!
//! spec §6 lists `Dual_Prime_Arithmetic` as provided by the bitstream layer;
//! there is no separate layer to provide it in a single-crate
//! reimplementation, so this crate supplies it directly (see SPEC_FULL.md
//! §6 resolution). It is a pure function of the transmitted vector, the
//! differential correction, and whether the top field is displayed first.

/// The 2x2 derived motion vector table: `dmv[dest_parity] = (dx, dy)`.
pub type Dmv = [(i32, i32); 2];

/// Derive the opposite-parity motion vectors for dual-prime prediction.
///
/// `mvx`/`mvy` is the single transmitted (frame-relative, already
/// field-scaled where applicable) vector; `dmvector` is the small
/// bitstream-coded differential correction; `top_field_first` is the
/// picture coding extension flag of the same name.
pub fn dual_prime_arithmetic(dmvector: [i32; 2], mvx: i32, mvy: i32, top_field_first: bool) -> Dmv {
    let round = |v: i32| if v > 0 { 1 } else { 0 };

    if top_field_first {
        // predict top field from bottom field
        let dmv_top = (
            ((mvx + round(mvx)) >> 1) + dmvector[0],
            ((mvy + round(mvy)) >> 1) + dmvector[1] - 1,
        );
        // predict bottom field from top field
        let dmv_bot = (
            ((3 * mvx + round(mvx)) >> 1) + dmvector[0],
            ((3 * mvy + round(mvy)) >> 1) + dmvector[1] + 1,
        );
        [dmv_top, dmv_bot]
    } else {
        // predict top field from bottom field
        let dmv_top = (
            ((3 * mvx + round(mvx)) >> 1) + dmvector[0],
            ((3 * mvy + round(mvy)) >> 1) + dmvector[1] - 1,
        );
        // predict bottom field from top field
        let dmv_bot = (
            ((mvx + round(mvx)) >> 1) + dmvector[0],
            ((mvy + round(mvy)) >> 1) + dmvector[1] + 1,
        );
        [dmv_top, dmv_bot]
    }
}
