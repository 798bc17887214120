//! Wide-lane kernels for x86/x86_64.
//!
//! The accumulation kernel works on eight 16-bit lanes at a time: an
//! intra-chunk inclusive prefix sum built from three shift-and-add steps,
//! plus a carried sum broadcast across all lanes so the running total spans
//! chunk boundaries. Finalization and the signed-16 to unsigned-8 pack
//! happen in-register before the 8-byte store.
//!
//! Callers are responsible for checking CPU features at runtime before
//! entering any function here; lengths that are not a multiple of the lane
//! count are finished by the scalar engine outside this module.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::fill_rule::FillRule;

/// Lane count of the accumulation kernel (eight i16 per 128-bit register).
pub(crate) const LANES: usize = 8;

/// Saturating byte add over 16-byte chunks, scalar tail for the rest.
///
/// # Safety
///
/// The caller must verify SSE2 support (always present on x86_64).
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn combine_sse2(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    let mut dst_chunks = dst.chunks_exact_mut(16);
    let mut src_chunks = src.chunks_exact(16);
    for (d, s) in (&mut dst_chunks).zip(&mut src_chunks) {
        let a = _mm_loadu_si128(s.as_ptr() as *const __m128i);
        let b = _mm_loadu_si128(d.as_ptr() as *const __m128i);
        _mm_storeu_si128(d.as_mut_ptr() as *mut __m128i, _mm_adds_epu8(a, b));
    }
    for (d, s) in dst_chunks
        .into_remainder()
        .iter_mut()
        .zip(src_chunks.remainder())
    {
        *d = d.saturating_add(*s);
    }
}

/// Accumulate whole 8-lane chunks of `deltas` into `dst`, zeroing the deltas
/// as they are read. Returns the running sum after the last lane, to seed
/// the scalar tail.
///
/// # Safety
///
/// The caller must verify SSSE3 support, and `dst.len() == deltas.len()`
/// must be a multiple of [`LANES`].
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn accumulate_ssse3(dst: &mut [u8], deltas: &mut [i16], rule: FillRule) -> i16 {
    debug_assert_eq!(dst.len(), deltas.len());
    debug_assert_eq!(deltas.len() % LANES, 0);

    let zero = _mm_setzero_si128();
    // Shuffle mask replicating the topmost i16 lane (the chunk total) into
    // every lane, forming the carry for the next chunk.
    let carry_mask = _mm_set1_epi16(0x0f0e);
    let mut sum = zero;

    for (cover, delta) in dst.chunks_exact_mut(LANES).zip(deltas.chunks_exact_mut(LANES)) {
        let mut a = _mm_loadu_si128(delta.as_ptr() as *const __m128i);
        // The chunk is never read again; zero it as part of the consuming
        // load rather than with a second pass afterwards.
        _mm_storeu_si128(delta.as_mut_ptr() as *mut __m128i, zero);
        // Inclusive prefix sum in log2(LANES) steps: shift the whole vector
        // up by 4, 2, then 1 lanes, adding after each shift. Every lane ends
        // up holding the sum of itself and all lanes below it.
        a = _mm_add_epi16(a, _mm_slli_si128::<8>(a));
        a = _mm_add_epi16(a, _mm_slli_si128::<4>(a));
        a = _mm_add_epi16(a, _mm_slli_si128::<2>(a));
        a = _mm_add_epi16(a, sum);

        let finalized = match rule {
            // packus performs the clamp to [0, 255] directly.
            FillRule::NonZero => a,
            FillRule::EvenOdd => {
                // |(s & 0xff) - (s & 0x100)|, the period-256 triangle fold.
                let low = _mm_and_si128(a, _mm_set1_epi16(0xff));
                let bit8 = _mm_and_si128(a, _mm_set1_epi16(0x100));
                _mm_abs_epi16(_mm_sub_epi16(low, bit8))
            }
        };
        let packed = _mm_packus_epi16(finalized, finalized);
        _mm_storel_epi64(cover.as_mut_ptr() as *mut __m128i, packed);

        sum = _mm_shuffle_epi8(a, carry_mask);
    }

    _mm_extract_epi16::<0>(sum) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::accumulate_scalar;
    use crate::combine::combine_scalar;

    #[test]
    fn test_combine_matches_scalar() {
        if !std::arch::is_x86_feature_detected!("sse2") {
            return;
        }
        let a: Vec<u8> = (0..100).map(|i| (i * 3 % 256) as u8).collect();
        let b: Vec<u8> = (0..100).map(|i| (200 - i) as u8).collect();
        let mut wide = a.clone();
        unsafe { combine_sse2(&mut wide, &b) };
        let mut scalar = a;
        combine_scalar(&mut scalar, &b);
        assert_eq!(wide, scalar);
    }

    #[test]
    fn test_accumulate_matches_scalar_and_returns_carry() {
        if !std::arch::is_x86_feature_detected!("ssse3") {
            return;
        }
        for rule in [FillRule::NonZero, FillRule::EvenOdd] {
            let deltas: Vec<i16> = (0..64i16).map(|i| i * 41 % 700 - 350).collect();
            let mut wide_deltas = deltas.clone();
            let mut wide = vec![0u8; 64];
            let wide_carry = unsafe { accumulate_ssse3(&mut wide, &mut wide_deltas, rule) };

            let mut scalar_deltas = deltas;
            let mut scalar = vec![0u8; 64];
            let scalar_carry = accumulate_scalar(&mut scalar, &mut scalar_deltas, 0, rule);

            assert_eq!(wide, scalar, "coverage differs under {:?}", rule);
            assert_eq!(wide_carry, scalar_carry, "carry differs under {:?}", rule);
            assert_eq!(wide_deltas, scalar_deltas);
            assert!(wide_deltas.iter().all(|&d| d == 0));
        }
    }
}
