//! Gap-free segment sequences over the unit extent.

use serde::{Deserialize, Serialize};

use super::linear::{LinearRange, RangeError};

/// One value over one sub-extent of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment<V> {
    pub range: LinearRange,
    pub value: V,
}

impl<V> Segment<V> {
    pub fn new(range: LinearRange, value: V) -> Self {
        Self { range, value }
    }
}

/// An ordered sequence of segments that exactly tiles `[0, 1]`.
///
/// The tiling invariant holds at all times: the first segment starts at `0`,
/// the last ends at `1`, and each segment begins exactly where the previous
/// one ends. There are no gaps, no overlaps and at least one segment.
/// Mutation goes through [`SegmentSequence::write`], which splits existing
/// segments at the incoming bounds and hands back the overwritten pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSequence<V> {
    segments: Vec<Segment<V>>,
}

impl<V: Clone + PartialEq> SegmentSequence<V> {
    /// A sequence with a single segment carrying `value` over the whole
    /// extent.
    pub fn uniform(value: V) -> Self {
        Self {
            segments: vec![Segment::new(LinearRange::full(), value)],
        }
    }

    /// Build a sequence from segments, validating the tiling invariant.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::BrokenTiling`] when the segments leave a gap,
    /// overlap, or do not span `[0, 1]`.
    pub fn from_segments(segments: Vec<Segment<V>>) -> Result<Self, RangeError> {
        let first = segments
            .first()
            .ok_or(RangeError::BrokenTiling("no segments"))?;
        if first.range.start() != 0.0 {
            return Err(RangeError::BrokenTiling("first segment does not start at 0"));
        }
        for w in segments.windows(2) {
            if w[0].range.end() != w[1].range.start() {
                return Err(RangeError::BrokenTiling(
                    "consecutive segments do not share a boundary",
                ));
            }
        }
        if segments[segments.len() - 1].range.end() != 1.0 {
            return Err(RangeError::BrokenTiling("last segment does not end at 1"));
        }
        Ok(Self { segments })
    }

    /// The segments in order.
    pub fn segments(&self) -> &[Segment<V>] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a sequence carries at least one segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The value at a fractional position.
    ///
    /// A position on an internal boundary belongs to the following segment;
    /// `1.0` belongs to the last.
    pub fn value_at(&self, pos: f64) -> &V {
        let pos = pos.clamp(0.0, 1.0);
        let seg = self
            .segments
            .iter()
            .find(|s| pos < s.range.end())
            .unwrap_or(&self.segments[self.segments.len() - 1]);
        &seg.value
    }

    /// Overwrite `range` with `value` and return the overwritten pieces.
    ///
    /// Every existing segment intersecting `range` is split at the range
    /// bounds; each inside portion becomes its own segment carrying the new
    /// value, so boundaries that existed inside `range` are preserved and
    /// adjacent equal values are not coalesced. The overwritten pieces come
    /// back clipped to `range` with their previous values, in order.
    ///
    /// Incoming bounds snap to existing segment boundaries within `eps`, so
    /// remnant pieces shorter than `eps` never appear. A range that collapses
    /// under snapping is dropped; the sequence is untouched and the returned
    /// vector is empty. Otherwise at least one piece is overwritten.
    pub fn write(&mut self, range: LinearRange, value: V, eps: f64) -> Vec<Segment<V>> {
        let start = self.snap(range.start(), eps);
        let end = self.snap(range.end(), eps);
        if start >= end {
            return Vec::new();
        }

        let mut displaced = Vec::new();
        let mut rebuilt = Vec::with_capacity(self.segments.len() + 2);
        for seg in self.segments.drain(..) {
            let (s, e) = (seg.range.start(), seg.range.end());
            if e <= start || s >= end {
                rebuilt.push(seg);
                continue;
            }
            if s < start {
                rebuilt.push(Segment::new(
                    LinearRange::from_parts(s, start),
                    seg.value.clone(),
                ));
            }
            let inside = LinearRange::from_parts(s.max(start), e.min(end));
            rebuilt.push(Segment::new(inside, value.clone()));
            displaced.push(Segment::new(inside, seg.value.clone()));
            if e > end {
                rebuilt.push(Segment::new(LinearRange::from_parts(end, e), seg.value));
            }
        }
        self.segments = rebuilt;
        displaced
    }

    /// Whether the sequence satisfies the tiling invariant and carries no
    /// segment narrower than `eps`.
    pub fn is_wellformed(&self, eps: f64) -> bool {
        let Some(first) = self.segments.first() else {
            return false;
        };
        if first.range.start() != 0.0 || self.segments[self.segments.len() - 1].range.end() != 1.0
        {
            return false;
        }
        self.segments
            .windows(2)
            .all(|w| w[0].range.end() == w[1].range.start())
            && self.segments.iter().all(|s| s.range.width() >= eps)
    }

    /// Merge adjacent segments carrying equal values.
    pub fn coalesce(&mut self) {
        let mut merged: Vec<Segment<V>> = Vec::with_capacity(self.segments.len());
        for seg in self.segments.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.value == seg.value => {
                    prev.range =
                        LinearRange::from_parts(prev.range.start(), seg.range.end());
                }
                _ => merged.push(seg),
            }
        }
        self.segments = merged;
    }

    /// Snap a position to the nearest existing boundary within `eps`.
    fn snap(&self, pos: f64, eps: f64) -> f64 {
        let mut best = pos;
        let mut best_d = eps;
        for b in self.boundaries() {
            let d = (pos - b).abs();
            if d <= best_d {
                best = b;
                best_d = d;
            }
        }
        best
    }

    fn boundaries(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(0.0).chain(self.segments.iter().map(|s| s.range.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 0.004;

    fn range(start: f64, end: f64) -> LinearRange {
        LinearRange::new(start, end).unwrap()
    }

    fn assert_tiling<V: Clone + PartialEq + std::fmt::Debug>(seq: &SegmentSequence<V>) {
        assert_eq!(seq.segments()[0].range.start(), 0.0);
        assert_eq!(seq.segments()[seq.len() - 1].range.end(), 1.0);
        for w in seq.segments().windows(2) {
            assert_eq!(w[0].range.end(), w[1].range.start());
        }
    }

    #[test]
    fn test_uniform_covers_extent() {
        let seq = SegmentSequence::uniform(Some(7));
        assert_eq!(seq.len(), 1);
        assert!(seq.segments()[0].range.is_full());
        assert_tiling(&seq);
    }

    #[test]
    fn test_write_middle_splits_in_three() {
        let mut seq = SegmentSequence::uniform(Some("old"));
        let displaced = seq.write(range(0.25, 0.75), Some("new"), EPS);

        assert_eq!(seq.len(), 3);
        assert_tiling(&seq);
        assert_eq!(*seq.value_at(0.1), Some("old"));
        assert_eq!(*seq.value_at(0.5), Some("new"));
        assert_eq!(*seq.value_at(0.9), Some("old"));

        assert_eq!(displaced.len(), 1);
        assert_eq!(displaced[0].range, range(0.25, 0.75));
        assert_eq!(displaced[0].value, Some("old"));
    }

    #[test]
    fn test_write_preserves_interior_boundaries() {
        // Pre-state has boundaries at 0.4 and 0.6; writing across them keeps
        // them as separate equal-valued segments.
        let mut seq = SegmentSequence::from_segments(vec![
            Segment::new(range(0.0, 0.4), Some("1")),
            Segment::new(range(0.4, 0.6), Some("2")),
            Segment::new(range(0.6, 1.0), Some("3")),
        ])
        .unwrap();
        let displaced = seq.write(range(0.2, 0.8), Some("x"), EPS);

        let got: Vec<_> = seq
            .segments()
            .iter()
            .map(|s| (s.range.start(), s.range.end(), s.value))
            .collect();
        assert_eq!(
            got,
            vec![
                (0.0, 0.2, Some("1")),
                (0.2, 0.4, Some("x")),
                (0.4, 0.6, Some("x")),
                (0.6, 0.8, Some("x")),
                (0.8, 1.0, Some("3")),
            ]
        );
        assert_eq!(displaced.len(), 3);
        assert_eq!(displaced[0].value, Some("1"));
        assert_eq!(displaced[1].value, Some("2"));
        assert_eq!(displaced[2].value, Some("3"));
        assert_tiling(&seq);
    }

    #[test]
    fn test_write_across_boundary_clips_displaced() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.0, 0.5), Some(2), EPS);
        let displaced = seq.write(range(0.3, 0.7), Some(3), EPS);

        assert_eq!(seq.len(), 4);
        assert_tiling(&seq);
        assert_eq!(displaced.len(), 2);
        assert_eq!(displaced[0].range, range(0.3, 0.5));
        assert_eq!(displaced[0].value, Some(2));
        assert_eq!(displaced[1].range, range(0.5, 0.7));
        assert_eq!(displaced[1].value, Some(1));
    }

    #[test]
    fn test_write_full_extent() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.2, 0.6), Some(2), EPS);
        let displaced = seq.write(LinearRange::full(), Some(9), EPS);

        assert_eq!(seq.len(), 3);
        assert!(seq.segments().iter().all(|s| s.value == Some(9)));
        assert_eq!(displaced.len(), 3);
        assert_tiling(&seq);
    }

    #[test]
    fn test_write_snaps_to_nearby_boundary() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.0, 0.5), Some(2), EPS);
        // 0.498 is within eps of the boundary at 0.5; no sliver appears.
        seq.write(range(0.498, 0.8), Some(3), EPS);

        assert_eq!(seq.len(), 3);
        assert_tiling(&seq);
        assert_eq!(seq.segments()[1].range, range(0.5, 0.8));
    }

    #[test]
    fn test_write_collapsed_by_snapping_is_noop() {
        let mut seq = SegmentSequence::uniform(Some(1));
        // Both bounds snap onto the boundary at 0.
        let displaced = seq.write(range(0.0, 0.003), Some(2), EPS);

        assert!(displaced.is_empty());
        assert_eq!(seq.len(), 1);
        assert_eq!(*seq.value_at(0.0), Some(1));
    }

    #[test]
    fn test_write_start_touching_existing_boundary() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.25, 0.75), Some(2), EPS);
        let displaced = seq.write(range(0.75, 1.0), Some(3), EPS);

        assert_eq!(seq.len(), 3);
        assert_tiling(&seq);
        assert_eq!(displaced.len(), 1);
        assert_eq!(displaced[0].value, Some(1));
    }

    #[test]
    fn test_value_at_internal_boundary_belongs_to_following() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.5, 1.0), Some(2), EPS);
        assert_eq!(*seq.value_at(0.5), Some(2));
        assert_eq!(*seq.value_at(1.0), Some(2));
        assert_eq!(*seq.value_at(0.0), Some(1));
    }

    #[test]
    fn test_coalesce_merges_equal_neighbours() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.2, 0.5), Some(2), EPS);
        seq.write(range(0.5, 0.8), Some(2), EPS);
        assert_eq!(seq.len(), 4);

        seq.coalesce();
        assert_eq!(seq.len(), 3);
        assert_tiling(&seq);
        assert_eq!(seq.segments()[1].range, range(0.2, 0.8));
    }

    #[test]
    fn test_coalesce_keeps_distinct_neighbours() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.5, 1.0), Some(2), EPS);
        seq.coalesce();
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_is_wellformed_after_writes() {
        let mut seq = SegmentSequence::uniform(Some(1));
        seq.write(range(0.2, 0.6), Some(2), EPS);
        seq.write(range(0.4, 0.9), Some(3), EPS);
        assert!(seq.is_wellformed(EPS));
    }

    #[test]
    fn test_is_wellformed_rejects_sub_eps_segment() {
        let seq = SegmentSequence::from_segments(vec![
            Segment::new(range(0.0, 0.002), Some(1)),
            Segment::new(range(0.002, 1.0), Some(2)),
        ])
        .unwrap();
        assert!(!seq.is_wellformed(EPS));
    }

    #[test]
    fn test_from_segments_valid() {
        let seq = SegmentSequence::from_segments(vec![
            Segment::new(range(0.0, 0.4), Some(1)),
            Segment::new(range(0.4, 1.0), Some(2)),
        ])
        .unwrap();
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_from_segments_rejects_gap() {
        let result = SegmentSequence::from_segments(vec![
            Segment::new(range(0.0, 0.4), Some(1)),
            Segment::new(range(0.5, 1.0), Some(2)),
        ]);
        assert!(matches!(result, Err(RangeError::BrokenTiling(_))));
    }

    #[test]
    fn test_from_segments_rejects_partial_cover() {
        let result =
            SegmentSequence::from_segments(vec![Segment::new(range(0.0, 0.9), Some(1))]);
        assert!(matches!(result, Err(RangeError::BrokenTiling(_))));
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        let result: Result<SegmentSequence<Option<i32>>, _> =
            SegmentSequence::from_segments(vec![]);
        assert!(result.is_err());
    }
}
