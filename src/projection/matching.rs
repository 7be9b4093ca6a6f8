//! Map-matching collaborator contract.

use crate::feature::ImportedFeature;
use crate::geom::{BoundingBox, Polyline};
use crate::network::EdgeId;

/// Search hint handed to the match provider alongside the feature line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchContext {
    pub bbox: BoundingBox,
}

impl SearchContext {
    pub fn new(bbox: BoundingBox) -> Self {
        Self { bbox }
    }

    /// Context covering the feature's own extent.
    pub fn for_feature(feature: &ImportedFeature) -> Self {
        Self {
            bbox: feature.geometry().bbox(),
        }
    }
}

/// Result of matching one feature line onto the network.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatch {
    /// Portion of the feature geometry that runs along the network.
    pub overlap: Polyline,
    /// Edges the overlap runs along, in travel order.
    pub edge_ids: Vec<EdgeId>,
}

/// External map-matching collaborator.
///
/// The pipeline treats matching as a black box: implementations may be HMM
/// matchers, plain distance snappers or test stubs. `None` means the feature
/// could not be placed on the network at all; such features are counted and
/// skipped, never guessed at.
pub trait MatchProvider: Send + Sync {
    fn match_feature(&self, line: &Polyline, context: &SearchContext) -> Option<FeatureMatch>;
}
