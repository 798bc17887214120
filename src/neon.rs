//! Wide-lane kernels for aarch64 NEON.
//!
//! Only the saturating combine has a NEON path; accumulation on aarch64 runs
//! through the scalar engine.

use core::arch::aarch64::{vld1q_u8, vqaddq_u8, vst1q_u8};

/// Saturating byte add over 16-byte chunks, scalar tail for the rest.
///
/// # Safety
///
/// The caller must verify NEON support.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn combine_neon(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    let mut dst_chunks = dst.chunks_exact_mut(16);
    let mut src_chunks = src.chunks_exact(16);
    for (d, s) in (&mut dst_chunks).zip(&mut src_chunks) {
        let a = vld1q_u8(s.as_ptr());
        let b = vld1q_u8(d.as_ptr());
        vst1q_u8(d.as_mut_ptr(), vqaddq_u8(a, b));
    }
    for (d, s) in dst_chunks
        .into_remainder()
        .iter_mut()
        .zip(src_chunks.remainder())
    {
        *d = d.saturating_add(*s);
    }
}
