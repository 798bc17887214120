//! Winding rules for deciding interior coverage from net edge crossings.

/// Fill rule for resolving self-intersecting and nested contours.
///
/// Selected per path by the rasterizer and applied per scanline when the
/// accumulated winding deltas are finalized into coverage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
    /// All points with a nonzero net crossing count are filled.
    NonZero,
    /// Filling alternates with each crossing of the outline.
    EvenOdd,
}
