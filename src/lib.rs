//! # coverbuf
//!
//! Coverage-buffer kernels for scanline anti-aliasing rasterizers.
//!
//! A scanline rasterizer walks polygon edges across each row of pixels and
//! deposits signed winding deltas into a per-row buffer. This crate provides
//! the arithmetic layer that sits directly beneath that traversal:
//!
//! 1. **Accumulation**: a running prefix sum over the signed deltas,
//!    finalized through a winding rule ([`FillRule`]) into 8-bit alpha
//!    coverage (0 = transparent, 255 = fully covered). The delta buffer is
//!    zeroed as it is consumed, so the caller can reuse it for the next
//!    scanline without a separate clear pass.
//! 2. **Saturating combine**: merging two coverage buffers with a clamped
//!    add, so overlapping passes never exceed full opacity.
//!
//! Everything above this layer (edge setup, scanline iteration, color and
//! gamma, compositing) belongs to the caller; the kernels only transform
//! caller-owned buffers in place and never allocate.
//!
//! Each operation has a wide-lane implementation (SSE2/SSSE3 on x86, NEON
//! on aarch64) and a scalar implementation producing bit-identical results.
//! Selection is internal, based on runtime CPU feature detection.
//!
//! ```
//! use coverbuf::{accumulate_non_zero, combine_saturating};
//!
//! let mut deltas = [3i16, -1, 0, 2, -4, 0, 0, 0];
//! let mut cover = [0u8; 8];
//! accumulate_non_zero(&mut cover, &mut deltas);
//! assert_eq!(cover, [3, 2, 2, 4, 0, 0, 0, 0]);
//! assert_eq!(deltas, [0; 8]); // consumed
//!
//! let mut mask = [250u8; 8];
//! combine_saturating(&mut mask, &cover);
//! assert_eq!(mask[3], 254);
//! assert_eq!(mask[4], 250);
//! ```

pub mod accumulate;
pub mod combine;
pub mod fill_rule;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

pub use accumulate::{accumulate, accumulate_even_odd, accumulate_non_zero};
pub use combine::combine_saturating;
pub use fill_rule::FillRule;
