//! Property tests pitting the dispatched kernels against independent scalar
//! references, on random and adversarial inputs.

#![allow(missing_docs)]

use coverbuf::{
    accumulate, accumulate_even_odd, accumulate_non_zero, combine_saturating, FillRule,
};
use proptest::prelude::*;

// Independent references, written from the definitions rather than shared
// with the crate internals. The running sum is 16-bit and wraps, matching
// the lane arithmetic of the wide paths.

fn reference_non_zero(deltas: &[i16]) -> Vec<u8> {
    let mut s = 0i16;
    deltas
        .iter()
        .map(|&d| {
            s = s.wrapping_add(d);
            s.clamp(0, 255) as u8
        })
        .collect()
}

fn reference_even_odd(deltas: &[i16]) -> Vec<u8> {
    let mut s = 0i16;
    deltas
        .iter()
        .map(|&d| {
            s = s.wrapping_add(d);
            ((s & 0xff) - (s & 0x100)).unsigned_abs().min(255) as u8
        })
        .collect()
}

/// Delta buffers mixing plain random values with adversarial ones that
/// stress wrapping and the clamp/fold boundaries. Lengths straddle the
/// 8-lane chunk width on both sides.
fn delta_buffer() -> impl Strategy<Value = Vec<i16>> {
    let element = prop_oneof![
        4 => -400i16..400,
        1 => Just(i16::MIN),
        1 => Just(i16::MAX),
        2 => prop_oneof![Just(-256i16), Just(-255), Just(255), Just(256)],
    ];
    prop::collection::vec(element, 0..200)
}

fn fill_rule() -> impl Strategy<Value = FillRule> {
    prop_oneof![Just(FillRule::NonZero), Just(FillRule::EvenOdd)]
}

proptest! {
    #[test]
    fn combine_matches_reference(pairs in prop::collection::vec(any::<(u8, u8)>(), 0..200)) {
        let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
        let mut dst = a.clone();
        combine_saturating(&mut dst, &b);
        for i in 0..a.len() {
            let expected = (u16::from(a[i]) + u16::from(b[i])).min(255) as u8;
            prop_assert_eq!(dst[i], expected, "at index {}", i);
        }
    }

    #[test]
    fn combine_commutes_in_value(pairs in prop::collection::vec(any::<(u8, u8)>(), 0..200)) {
        let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
        let mut ab = a.clone();
        combine_saturating(&mut ab, &b);
        let mut ba = b;
        combine_saturating(&mut ba, &a);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn non_zero_matches_reference(deltas in delta_buffer()) {
        let expected = reference_non_zero(&deltas);
        let mut consumed = deltas;
        let mut cover = vec![0u8; consumed.len()];
        accumulate_non_zero(&mut cover, &mut consumed);
        prop_assert_eq!(cover, expected);
    }

    #[test]
    fn even_odd_matches_reference(deltas in delta_buffer()) {
        let expected = reference_even_odd(&deltas);
        let mut consumed = deltas;
        let mut cover = vec![0u8; consumed.len()];
        accumulate_even_odd(&mut cover, &mut consumed);
        prop_assert_eq!(cover, expected);
    }

    #[test]
    fn alternating_signs_match_reference(
        magnitudes in prop::collection::vec(0i16..1000, 0..200),
        rule in fill_rule(),
    ) {
        let deltas: Vec<i16> = magnitudes
            .iter()
            .enumerate()
            .map(|(i, &m)| if i % 2 == 0 { m } else { -m })
            .collect();
        let expected = match rule {
            FillRule::NonZero => reference_non_zero(&deltas),
            FillRule::EvenOdd => reference_even_odd(&deltas),
        };
        let mut consumed = deltas;
        let mut cover = vec![0u8; consumed.len()];
        accumulate(&mut cover, &mut consumed, rule);
        prop_assert_eq!(cover, expected);
    }

    #[test]
    fn accumulate_zeroes_deltas(deltas in delta_buffer(), rule in fill_rule()) {
        let mut consumed = deltas;
        let mut cover = vec![0u8; consumed.len()];
        accumulate(&mut cover, &mut consumed, rule);
        prop_assert!(consumed.iter().all(|&d| d == 0));

        // Re-accumulating the zeroed buffer yields all-zero coverage under
        // either rule, since the running sum never leaves zero.
        accumulate(&mut cover, &mut consumed, rule);
        prop_assert!(cover.iter().all(|&c| c == 0));
    }
}
