//! The conflict protocol: structured records of rejected values.
//!
//! Semantic disagreements are never errors. Whenever overlapping fragments
//! disagree, a side cannot be determined, a value fails validation, or a
//! dependent attribute is rejected by its primary, the merge resolves the
//! situation deterministically and records what happened here. The protocol
//! is per edge, append-only, and never mutated after the run completes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{AttributeValue, CanonicalAttribute};
use crate::network::SegmentSide;
use crate::range::LinearRange;

/// Classification of a recorded conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Overlapping fragments of one run disagreed; the later value won.
    OverlappingValues,
    /// A dependent value was rejected by the primary attribute's state.
    IncompatibleCombination,
    /// The target side could not be determined; nothing was written.
    AmbiguousSide,
    /// A raw value outside the attribute's vocabulary; nothing was written.
    InvalidValue,
}

/// One recorded disagreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub attribute: CanonicalAttribute,
    pub range: LinearRange,
    /// Side the conflict applies to; `None` on single-sequence groups.
    pub side: Option<SegmentSide>,
    /// The value that holds after resolution, if one was written.
    pub adopted: Option<AttributeValue>,
    /// Display forms of the rejected values.
    pub rejected: Vec<String>,
    /// Human-readable account of the disagreement.
    pub message: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Per-edge, append-only log of conflicts, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictProtocol {
    entries: Vec<Conflict>,
}

impl ConflictProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a conflict.
    pub fn record(&mut self, conflict: Conflict) {
        self.entries.push(conflict);
    }

    /// The recorded conflicts in detection order.
    pub fn entries(&self) -> &[Conflict] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Surface;

    fn conflict(message: &str) -> Conflict {
        Conflict {
            kind: ConflictKind::OverlappingValues,
            attribute: CanonicalAttribute::Surface,
            range: LinearRange::new(0.2, 0.4).unwrap(),
            side: Some(SegmentSide::Left),
            adopted: Some(AttributeValue::Surface(Surface::Asphalt)),
            rejected: vec!["concrete".to_string()],
            message: message.to_string(),
        }
    }

    #[test]
    fn test_record_preserves_order() {
        let mut protocol = ConflictProtocol::new();
        assert!(protocol.is_empty());

        protocol.record(conflict("first"));
        protocol.record(conflict("second"));

        assert_eq!(protocol.len(), 2);
        assert_eq!(protocol.entries()[0].message, "first");
        assert_eq!(protocol.entries()[1].message, "second");
    }

    #[test]
    fn test_display_renders_message() {
        let c = conflict("asphalt overwrote concrete on [0.2, 0.4]");
        assert_eq!(c.to_string(), "asphalt overwrote concrete on [0.2, 0.4]");
    }

    #[test]
    fn test_serializes_for_export() {
        // Protocols are the run's exportable artifact; kinds and attributes
        // go out in snake_case.
        let json = serde_json::to_value(conflict("surface sett overwrote asphalt")).unwrap();
        assert_eq!(json["kind"], "overlapping_values");
        assert_eq!(json["attribute"], "surface");
        assert_eq!(json["side"], "left");
        assert_eq!(json["rejected"][0], "concrete");

        let back: Conflict = serde_json::from_value(json).unwrap();
        assert_eq!(back.message, "surface sett overwrote asphalt");
    }
}
