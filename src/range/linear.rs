//! Fractional linear ranges along an edge.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by range construction and sequence validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// A range bound was NaN or infinite.
    #[error("range bounds must be finite, got [{start}, {end}]")]
    NonFinite { start: f64, end: f64 },
    /// A range bound fell outside `[0, 1]` beyond the tolerance.
    #[error("range bounds [{start}, {end}] fall outside the unit extent")]
    OutOfBounds { start: f64, end: f64 },
    /// The range has no usable extent.
    #[error("range [{start}, {end}] has no usable extent")]
    Degenerate { start: f64, end: f64 },
    /// A segment sequence violated the tiling invariant.
    #[error("segment sequence does not tile [0, 1]: {0}")]
    BrokenTiling(&'static str),
}

/// A directed sub-extent of an edge in fractional coordinates.
///
/// Both bounds live in `[0, 1]`, where `0` is the edge's first vertex and `1`
/// its last, independent of the edge's metric length. The invariant
/// `start < end` holds for every constructed value; ranges never describe a
/// reversed or empty extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRange {
    start: f64,
    end: f64,
}

impl LinearRange {
    /// Create a range from exact bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NonFinite`] for NaN or infinite bounds,
    /// [`RangeError::OutOfBounds`] for bounds outside `[0, 1]`, and
    /// [`RangeError::Degenerate`] when `start >= end`.
    pub fn new(start: f64, end: f64) -> Result<Self, RangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RangeError::NonFinite { start, end });
        }
        if start < 0.0 || end > 1.0 {
            return Err(RangeError::OutOfBounds { start, end });
        }
        if start >= end {
            return Err(RangeError::Degenerate { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a range from raw projected bounds, tolerating `eps` of
    /// numerical slack.
    ///
    /// Bounds within `eps` outside the unit extent are clamped onto it, and
    /// bounds within `eps` of `0` or `1` snap to the exact endpoint, so
    /// full-extent projections come out as exactly `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::OutOfBounds`] for bounds beyond `[0, 1] ± eps`
    /// and [`RangeError::Degenerate`] when the normalized range is narrower
    /// than `eps`. Degenerate here is the caller's cue to drop the fragment,
    /// not a data error.
    pub fn normalized(start: f64, end: f64, eps: f64) -> Result<Self, RangeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RangeError::NonFinite { start, end });
        }
        if start < -eps || end > 1.0 + eps || start > 1.0 + eps || end < -eps {
            return Err(RangeError::OutOfBounds { start, end });
        }
        let snap = |v: f64| {
            if v <= eps {
                0.0
            } else if v >= 1.0 - eps {
                1.0
            } else {
                v
            }
        };
        let (start, end) = (snap(start), snap(end));
        if end - start <= eps {
            return Err(RangeError::Degenerate { start, end });
        }
        Ok(Self { start, end })
    }

    /// The full extent `[0, 1]`.
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }

    /// Build a range from bounds already known to satisfy the invariant.
    pub(crate) fn from_parts(start: f64, end: f64) -> Self {
        debug_assert!(start >= 0.0 && start < end && end <= 1.0);
        Self { start, end }
    }

    /// Lower bound.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Fractional width of the range.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this range spans the whole edge.
    pub fn is_full(&self) -> bool {
        self.start == 0.0 && self.end == 1.0
    }

    /// Whether `pos` lies within the range, with `eps` of slack at both
    /// bounds.
    pub fn contains(&self, pos: f64, eps: f64) -> bool {
        pos >= self.start - eps && pos <= self.end + eps
    }

    /// Whether the ranges share more than `eps` of extent. Touching at a
    /// boundary or overlapping by a sliver does not count.
    pub fn overlaps(&self, other: &LinearRange, eps: f64) -> bool {
        self.end.min(other.end) - self.start.max(other.start) > eps
    }

    /// The shared extent of two ranges, if any.
    pub fn intersection(&self, other: &LinearRange) -> Option<LinearRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(LinearRange { start, end })
        } else {
            None
        }
    }
}

impl fmt::Display for LinearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.start, self.end)
    }
}
