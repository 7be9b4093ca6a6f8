//! Network edges and their attribute segment groups.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{AttributeValue, CanonicalAttribute};
use crate::geom::{BoundingBox, Polyline};
use crate::range::SegmentSequence;

/// Identifier of a network edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Storage side of a two-sided attribute group, relative to the edge's
/// stationing direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SegmentSide {
    Left,
    Right,
}

impl fmt::Display for SegmentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentSide::Left => write!(f, "left"),
            SegmentSide::Right => write!(f, "right"),
        }
    }
}

/// Attribute state of one side of an edge. `None` segments carry no recorded
/// value.
pub type AttributeSegments = SegmentSequence<Option<AttributeValue>>;

/// Per-attribute segment state of an edge.
///
/// The shape follows the edge: edges flagged two-sided keep independent left
/// and right sequences, all others a single sequence. Every sequence tiles
/// `[0, 1]` from the moment the group is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSegmentGroup {
    Single(AttributeSegments),
    TwoSided {
        left: AttributeSegments,
        right: AttributeSegments,
    },
}

impl AttributeSegmentGroup {
    /// An empty group in the shape matching `two_sided`.
    pub fn new(two_sided: bool) -> Self {
        if two_sided {
            AttributeSegmentGroup::TwoSided {
                left: SegmentSequence::uniform(None),
                right: SegmentSequence::uniform(None),
            }
        } else {
            AttributeSegmentGroup::Single(SegmentSequence::uniform(None))
        }
    }

    pub fn is_two_sided(&self) -> bool {
        matches!(self, AttributeSegmentGroup::TwoSided { .. })
    }

    /// The sequence addressed by `side`: `None` addresses the single
    /// sequence, `Some` one side of a two-sided group. Returns `None` when
    /// the address does not match the group's shape.
    pub fn sequence(&self, side: Option<SegmentSide>) -> Option<&AttributeSegments> {
        match (self, side) {
            (AttributeSegmentGroup::Single(seq), None) => Some(seq),
            (AttributeSegmentGroup::TwoSided { left, .. }, Some(SegmentSide::Left)) => {
                Some(left)
            }
            (AttributeSegmentGroup::TwoSided { right, .. }, Some(SegmentSide::Right)) => {
                Some(right)
            }
            _ => None,
        }
    }

    /// Mutable counterpart of [`AttributeSegmentGroup::sequence`].
    pub fn sequence_mut(
        &mut self,
        side: Option<SegmentSide>,
    ) -> Option<&mut AttributeSegments> {
        match (self, side) {
            (AttributeSegmentGroup::Single(seq), None) => Some(seq),
            (AttributeSegmentGroup::TwoSided { left, .. }, Some(SegmentSide::Left)) => {
                Some(left)
            }
            (AttributeSegmentGroup::TwoSided { right, .. }, Some(SegmentSide::Right)) => {
                Some(right)
            }
            _ => None,
        }
    }

    /// All sequences of the group with their side address.
    pub fn sequences(&self) -> Vec<(Option<SegmentSide>, &AttributeSegments)> {
        match self {
            AttributeSegmentGroup::Single(seq) => vec![(None, seq)],
            AttributeSegmentGroup::TwoSided { left, right } => vec![
                (Some(SegmentSide::Left), left),
                (Some(SegmentSide::Right), right),
            ],
        }
    }
}

/// A network edge: directed polyline geometry plus conflated attribute state.
///
/// Runs mutate detached copies of edges and hand them back to the store,
/// which checks `version` optimistically on replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    id: EdgeId,
    geometry: Polyline,
    two_sided: bool,
    version: u64,
    groups: BTreeMap<CanonicalAttribute, AttributeSegmentGroup>,
}

impl NetworkEdge {
    /// Create an edge with no attribute state at version 0.
    pub fn new(id: EdgeId, geometry: Polyline, two_sided: bool) -> Self {
        Self {
            id,
            geometry,
            two_sided,
            version: 0,
            groups: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn geometry(&self) -> &Polyline {
        &self.geometry
    }

    pub fn two_sided(&self) -> bool {
        self.two_sided
    }

    /// Metric length of the edge's geometry.
    pub fn length(&self) -> f64 {
        self.geometry.length()
    }

    /// Bounding box of the edge's geometry.
    pub fn bbox(&self) -> BoundingBox {
        self.geometry.bbox()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set the optimistic-concurrency version. Persistence implementations
    /// bump this after a successful replace.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// The segment group for `attribute`, if any value was ever written.
    pub fn group(&self, attribute: CanonicalAttribute) -> Option<&AttributeSegmentGroup> {
        self.groups.get(&attribute)
    }

    /// The segment group for `attribute`, created empty in the edge's shape
    /// on first access.
    pub fn group_mut(&mut self, attribute: CanonicalAttribute) -> &mut AttributeSegmentGroup {
        let two_sided = self.two_sided;
        self.groups
            .entry(attribute)
            .or_insert_with(|| AttributeSegmentGroup::new(two_sided))
    }

    /// All attribute groups of the edge.
    pub fn groups(&self) -> &BTreeMap<CanonicalAttribute, AttributeSegmentGroup> {
        &self.groups
    }
}
