//! Run-local write tracking.

use std::collections::BTreeMap;

use crate::format::{AttributeValue, CanonicalAttribute};
use crate::network::{AttributeSegments, SegmentSide};
use crate::range::{LinearRange, Segment, SegmentSequence};

/// Tracks what the current run has already written, per attribute and side.
///
/// Values that were on the edge before the run never conflict with incoming
/// writes; only two writes of the same run can. Each attribute/side gets a
/// lazily created sequence starting out all `None`, so the pieces displaced
/// by a write are exactly the sub-ranges this run wrote earlier.
#[derive(Debug, Default)]
pub(super) struct RunOverlay {
    sequences: BTreeMap<(CanonicalAttribute, Option<SegmentSide>), AttributeSegments>,
}

impl RunOverlay {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Record a write and return the overlay pieces it displaced.
    pub(super) fn write(
        &mut self,
        attribute: CanonicalAttribute,
        side: Option<SegmentSide>,
        range: LinearRange,
        value: AttributeValue,
        eps: f64,
    ) -> Vec<Segment<Option<AttributeValue>>> {
        self.sequences
            .entry((attribute, side))
            .or_insert_with(|| SegmentSequence::uniform(None))
            .write(range, Some(value), eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Surface;

    const EPS: f64 = 0.004;

    fn asphalt() -> AttributeValue {
        AttributeValue::Surface(Surface::Asphalt)
    }

    fn sett() -> AttributeValue {
        AttributeValue::Surface(Surface::Sett)
    }

    #[test]
    fn test_first_write_displaces_only_none() {
        let mut overlay = RunOverlay::new();
        let range = LinearRange::new(0.2, 0.8).unwrap();
        let displaced = overlay.write(CanonicalAttribute::Surface, None, range, asphalt(), EPS);
        assert!(displaced.iter().all(|piece| piece.value.is_none()));
    }

    #[test]
    fn test_second_write_surfaces_earlier_value() {
        let mut overlay = RunOverlay::new();
        overlay.write(
            CanonicalAttribute::Surface,
            None,
            LinearRange::new(0.0, 0.5).unwrap(),
            asphalt(),
            EPS,
        );
        let displaced = overlay.write(
            CanonicalAttribute::Surface,
            None,
            LinearRange::new(0.4, 0.8).unwrap(),
            sett(),
            EPS,
        );
        let written: Vec<_> = displaced
            .iter()
            .filter(|piece| piece.value.is_some())
            .collect();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].value, Some(asphalt()));
        assert!((written[0].range.start() - 0.4).abs() < 1e-9);
        assert!((written[0].range.end() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_sides_tracked_independently() {
        let mut overlay = RunOverlay::new();
        let range = LinearRange::new(0.0, 1.0).unwrap();
        overlay.write(
            CanonicalAttribute::Surface,
            Some(SegmentSide::Left),
            range,
            asphalt(),
            EPS,
        );
        let displaced = overlay.write(
            CanonicalAttribute::Surface,
            Some(SegmentSide::Right),
            range,
            sett(),
            EPS,
        );
        assert!(displaced.iter().all(|piece| piece.value.is_none()));
    }
}
