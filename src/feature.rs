//! Imported features: the immutable input records of a run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Polyline;

/// Identifier of an imported feature within its source dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// One external line geometry with its raw attributes.
///
/// Created by an external reader and never mutated. The attribute order is
/// the provenance order within the feature; together with the feature order
/// of the run it fixes the application order the merge relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedFeature {
    id: FeatureId,
    geometry: Polyline,
    attributes: Vec<(String, String)>,
    source: String,
}

impl ImportedFeature {
    pub fn new(
        id: FeatureId,
        geometry: Polyline,
        attributes: Vec<(String, String)>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id,
            geometry,
            attributes,
            source: source.into(),
        }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn geometry(&self) -> &Polyline {
        &self.geometry
    }

    /// Raw key/value pairs in provenance order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Name of the dataset this feature came from.
    pub fn source(&self) -> &str {
        &self.source
    }
}
