//! Saturating combine: merging two coverage buffers with a clamped add.
//!
//! Used to merge independently accumulated coverage (separate geometry
//! passes, or the two winding rules) into a single mask. Coverage composes
//! like opacity: overlapping passes must never exceed fully opaque, so the
//! add saturates at 255 instead of wrapping.

// ============================================================================
// Public entry point
// ============================================================================

/// Replace each `dst[i]` with `min(dst[i] + src[i], 255)`.
///
/// `src` is left unmodified. Both slices must have the same length.
///
/// # Panics
///
/// Panics if `dst` and `src` differ in length.
pub fn combine_saturating(dst: &mut [u8], src: &[u8]) {
    assert_eq!(
        dst.len(),
        src.len(),
        "coverage buffers must have equal length"
    );
    combine_impl(dst, src);
}

// ============================================================================
// Strategy selection
// ============================================================================

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn combine_impl(dst: &mut [u8], src: &[u8]) {
    if std::arch::is_x86_feature_detected!("sse2") {
        // SAFETY: SSE2 support was verified above.
        unsafe { crate::x86::combine_sse2(dst, src) }
    } else {
        combine_scalar(dst, src);
    }
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
fn combine_impl(dst: &mut [u8], src: &[u8]) {
    // SAFETY: NEON availability is guaranteed by the target_feature cfg.
    unsafe { crate::neon::combine_neon(dst, src) }
}

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    all(target_arch = "aarch64", target_feature = "neon")
)))]
fn combine_impl(dst: &mut [u8], src: &[u8]) {
    combine_scalar(dst, src);
}

// ============================================================================
// Scalar engine
// ============================================================================

/// Portable reference: the clamped add per element, with the sum formed in
/// u8 saturating arithmetic so it cannot overflow before the clamp.
#[cfg_attr(
    all(target_arch = "aarch64", target_feature = "neon"),
    allow(dead_code)
)]
pub(crate) fn combine_scalar(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d = d.saturating_add(*s);
    }
}

// ============================================================================
// Tests
// ============================================================================
