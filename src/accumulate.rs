//! Winding accumulation: prefix sum over signed coverage deltas.
//!
//! The delta buffer holds the net winding contribution each pixel column
//! received from edge crossings on the current scanline. Accumulation turns
//! it into 8-bit coverage: a running signed sum carried strictly left to
//! right across the whole buffer, finalized at each position through the
//! selected [`FillRule`]. The deltas are zeroed as they are consumed, which
//! doubles as the clear pass for the next scanline.
//!
//! The running sum is 16-bit two's-complement and wraps on overflow, in both
//! the scalar engine and the wide path (whose lane arithmetic wraps at 16
//! bits by construction), so the two produce bit-identical output.

use crate::fill_rule::FillRule;

// ============================================================================
// Public entry points
// ============================================================================

/// Accumulate `deltas` into `dst` under the given fill rule.
///
/// Every element of `deltas` reads as zero on return; the buffer is consumed
/// as scratch. Both slices must have the same length (any length is valid,
/// including zero).
///
/// # Panics
///
/// Panics if `dst` and `deltas` differ in length.
pub fn accumulate(dst: &mut [u8], deltas: &mut [i16], rule: FillRule) {
    assert_eq!(
        dst.len(),
        deltas.len(),
        "coverage and delta buffers must have equal length"
    );
    accumulate_impl(dst, deltas, rule);
}

/// Accumulate `deltas` into `dst` under the non-zero winding rule:
/// `coverage = clamp(sum, 0, 255)`.
///
/// `deltas` is fully zeroed on return. See [`accumulate`].
pub fn accumulate_non_zero(dst: &mut [u8], deltas: &mut [i16]) {
    accumulate(dst, deltas, FillRule::NonZero);
}

/// Accumulate `deltas` into `dst` under the even-odd winding rule:
/// `coverage = |(sum & 0xff) - (sum & 0x100)|`, a triangle wave with period
/// 256 that ramps 0→255 and folds back 255→0 as the sum keeps growing.
///
/// `deltas` is fully zeroed on return. See [`accumulate`].
pub fn accumulate_even_odd(dst: &mut [u8], deltas: &mut [i16]) {
    accumulate(dst, deltas, FillRule::EvenOdd);
}

// ============================================================================
// Strategy selection
// ============================================================================

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn accumulate_impl(dst: &mut [u8], deltas: &mut [i16], rule: FillRule) {
    if std::arch::is_x86_feature_detected!("ssse3") {
        // The wide path runs over whole 8-lane chunks; the remaining tail is
        // finished by the scalar engine seeded with the carried sum.
        let head = dst.len() - dst.len() % crate::x86::LANES;
        let (dst_head, dst_tail) = dst.split_at_mut(head);
        let (deltas_head, deltas_tail) = deltas.split_at_mut(head);
        // SAFETY: SSSE3 support was verified above; `head` is a multiple of
        // the lane count.
        let carry = unsafe { crate::x86::accumulate_ssse3(dst_head, deltas_head, rule) };
        accumulate_scalar(dst_tail, deltas_tail, carry, rule);
    } else {
        accumulate_scalar(dst, deltas, 0, rule);
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn accumulate_impl(dst: &mut [u8], deltas: &mut [i16], rule: FillRule) {
    accumulate_scalar(dst, deltas, 0, rule);
}

// ============================================================================
// Scalar engine
// ============================================================================

/// Portable reference engine, also used for remainder tails. Starts from the
/// carried sum `s` and returns the sum after the last element.
pub(crate) fn accumulate_scalar(dst: &mut [u8], deltas: &mut [i16], s: i16, rule: FillRule) -> i16 {
    match rule {
        FillRule::NonZero => accumulate_with(dst, deltas, s, finalize_non_zero),
        FillRule::EvenOdd => accumulate_with(dst, deltas, s, finalize_even_odd),
    }
}

#[inline]
fn accumulate_with(
    dst: &mut [u8],
    deltas: &mut [i16],
    mut s: i16,
    finalize: impl Fn(i16) -> u8,
) -> i16 {
    for (cover, delta) in dst.iter_mut().zip(deltas.iter_mut()) {
        s = s.wrapping_add(*delta);
        *delta = 0;
        *cover = finalize(s);
    }
    s
}

// ============================================================================
// Finalization
// ============================================================================

/// Non-zero rule: saturate the signed sum into `0..=255`.
#[inline]
fn finalize_non_zero(s: i16) -> u8 {
    s.clamp(0, 255) as u8
}

/// Even-odd rule: fold the sum into a triangle wave of period 256.
///
/// Low byte minus bit 8, absolute value. A sum with low byte zero and bit 8
/// set folds to 256, which saturates to 255 (the same saturation the wide
/// path gets from its signed-to-unsigned pack).
#[inline]
fn finalize_even_odd(s: i16) -> u8 {
    let folded = (s & 0xff) - (s & 0x100);
    folded.unsigned_abs().min(255) as u8
}

// ============================================================================
// Tests
// ============================================================================
