//! Fractional linear referencing along network edges.
//!
//! Attribute extents are expressed as [`LinearRange`] values in `[0, 1]`
//! rather than in metres, so they survive small geometric edits to the
//! underlying edge. [`SegmentSequence`] keeps per-edge attribute state as a
//! gap-free tiling of the unit extent and is the only mutation path the
//! merge engine uses.

mod linear;
mod sequence;

pub use linear::{LinearRange, RangeError};
pub use sequence::{Segment, SegmentSequence};
