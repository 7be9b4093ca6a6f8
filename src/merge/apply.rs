//! Fragment application against edge segment state.

use tracing::{debug, warn};

use crate::conflict::{Conflict, ConflictKind, ConflictProtocol};
use crate::format::{AttributeValue, CanonicalAttribute};
use crate::network::{NetworkEdge, SegmentSide};
use crate::range::{LinearRange, Segment};

use super::overlay::RunOverlay;
use super::rules;

/// Mutable view of one edge for one attribute during fragment application.
///
/// Constructed by the merge engine and handed to the adapter's application
/// entry points. Every write funnels through [`write`](Self::write), which
/// owns cross-validation, the segment update and conflict recording, so
/// adapters cannot bypass the merge semantics however they route.
pub struct ApplyTarget<'a> {
    edge: &'a mut NetworkEdge,
    attribute: CanonicalAttribute,
    overlay: &'a mut RunOverlay,
    protocol: &'a mut ConflictProtocol,
    eps: f64,
}

impl<'a> ApplyTarget<'a> {
    pub(super) fn new(
        edge: &'a mut NetworkEdge,
        attribute: CanonicalAttribute,
        overlay: &'a mut RunOverlay,
        protocol: &'a mut ConflictProtocol,
        eps: f64,
    ) -> Self {
        Self {
            edge,
            attribute,
            overlay,
            protocol,
            eps,
        }
    }

    /// Whether the underlying edge keeps independent per-side sequences.
    pub fn is_two_sided(&self) -> bool {
        self.edge.two_sided()
    }

    /// Write `value` over `range` on `side`, recording conflicts.
    ///
    /// The write is skipped entirely when cross-validation rejects the value
    /// against the primary attribute currently on this stretch; previous
    /// values stay and an [`ConflictKind::IncompatibleCombination`] entry is
    /// recorded. Otherwise the sequence is partitioned, and overlaps with
    /// this run's earlier writes holding a different value yield
    /// [`ConflictKind::OverlappingValues`] entries. Values present before
    /// the run are overwritten silently.
    pub fn write(&mut self, range: LinearRange, side: Option<SegmentSide>, value: AttributeValue) {
        let edge_id = self.edge.id();

        if let Some(primary) = rules::primary_of(self.attribute) {
            let offenders = self.offending_primaries(primary, range, side, value);
            if !offenders.is_empty() {
                let names: Vec<String> = offenders.iter().map(|v| v.to_string()).collect();
                self.protocol.record(Conflict {
                    kind: ConflictKind::IncompatibleCombination,
                    attribute: self.attribute,
                    range,
                    side,
                    adopted: None,
                    rejected: vec![value.to_string()],
                    message: format!(
                        "{} {} rejected by {} {} over {} on {}; previous values kept",
                        self.attribute,
                        value,
                        primary,
                        names.join(", "),
                        range,
                        side_label(side),
                    ),
                });
                return;
            }
        }

        let sequence = match self.edge.group_mut(self.attribute).sequence_mut(side) {
            Some(sequence) => sequence,
            None => {
                warn!(
                    edge = %edge_id,
                    attribute = %self.attribute,
                    ?side,
                    "write routed against the edge's group shape, dropped"
                );
                return;
            }
        };

        let displaced = sequence.write(range, Some(value), self.eps);
        if displaced.is_empty() {
            debug!(
                edge = %edge_id,
                attribute = %self.attribute,
                %range,
                "write collapsed below tolerance, nothing recorded"
            );
            return;
        }

        let overlapped = self.overlay.write(self.attribute, side, range, value, self.eps);
        self.record_overlap_conflicts(side, value, &overlapped);
    }

    /// Distinct primary values on the target stretch that reject `value`.
    fn offending_primaries(
        &self,
        primary: CanonicalAttribute,
        range: LinearRange,
        side: Option<SegmentSide>,
        value: AttributeValue,
    ) -> Vec<AttributeValue> {
        let mut offenders = Vec::new();
        let sequence = match self.edge.group(primary).and_then(|g| g.sequence(side)) {
            Some(sequence) => sequence,
            None => return offenders,
        };
        for segment in sequence.segments() {
            if !segment.range.overlaps(&range, self.eps) {
                continue;
            }
            if let Some(primary_value) = segment.value {
                if !rules::is_compatible(self.attribute, value, primary_value)
                    && !offenders.contains(&primary_value)
                {
                    offenders.push(primary_value);
                }
            }
        }
        offenders
    }

    /// Record one conflict per contiguous same-value stretch this run wrote
    /// earlier and the incoming value now disagrees with.
    fn record_overlap_conflicts(
        &mut self,
        side: Option<SegmentSide>,
        adopted: AttributeValue,
        overlapped: &[Segment<Option<AttributeValue>>],
    ) {
        let mut grouped: Vec<(f64, f64, AttributeValue)> = Vec::new();
        for piece in overlapped {
            let previous = match piece.value {
                Some(previous) if previous != adopted => previous,
                _ => continue,
            };
            match grouped.last_mut() {
                Some((_, end, value))
                    if *value == previous && (*end - piece.range.start()).abs() < 1e-12 =>
                {
                    *end = piece.range.end();
                }
                _ => grouped.push((piece.range.start(), piece.range.end(), previous)),
            }
        }

        for (start, end, previous) in grouped {
            let range = LinearRange::from_parts(start, end);
            self.protocol.record(Conflict {
                kind: ConflictKind::OverlappingValues,
                attribute: self.attribute,
                range,
                side,
                adopted: Some(adopted),
                rejected: vec![previous.to_string()],
                message: format!(
                    "{} {} overwrote {} over {} on {}",
                    self.attribute,
                    adopted,
                    previous,
                    range,
                    side_label(side),
                ),
            });
        }
    }
}

fn side_label(side: Option<SegmentSide>) -> String {
    match side {
        Some(side) => format!("the {} side", side),
        None => "the way".to_string(),
    }
}
