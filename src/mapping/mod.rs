//! Per-edge aggregation of projected fragments.
//!
//! Bridges projection and merging: each [`EdgeProjection`] is expanded into
//! one [`NormalizedFragment`] per recognized feature attribute, and all
//! fragments landing on the same edge are gathered into an [`EdgeMapping`].
//! The merge engine consumes one mapping per edge, so every edge is touched
//! by exactly one merge task.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::feature::ImportedFeature;
use crate::format::{CanonicalAttribute, FormatAdapter};
use crate::geom::Polyline;
use crate::network::EdgeId;
use crate::projection::EdgeProjection;
use crate::range::LinearRange;
use crate::side::SideResult;

/// One attribute observation bound to an edge range, ready to merge.
#[derive(Debug, Clone)]
pub struct NormalizedFragment {
    pub attribute: CanonicalAttribute,
    /// The value as delivered; normalization happens at merge time so
    /// invalid values can be reported with their original spelling.
    pub raw_value: String,
    pub range: LinearRange,
    /// Explicit side tag from the delivery format, if any.
    pub side: Option<SideResult>,
    /// Clipped feature geometry backing this fragment.
    pub geometry: Arc<Polyline>,
    /// True when the feature ran against the edge's digitisation direction.
    pub reversed: bool,
    /// Import-order sequence number; later fragments win ties.
    pub seq: usize,
}

/// All fragments of one run landing on one edge.
#[derive(Debug, Clone)]
pub struct EdgeMapping {
    pub edge_id: EdgeId,
    pub fragments: Vec<NormalizedFragment>,
}

/// Expand projections into per-edge mappings, one fragment per recognized
/// attribute.
///
/// Fragments carry a run-wide monotonically increasing `seq` in import
/// order, and the output is sorted by edge id, so downstream processing is
/// deterministic. Attribute keys the adapter does not recognize are skipped
/// with a debug log.
pub fn build_edge_mappings(
    projected: &[(&ImportedFeature, Vec<EdgeProjection>)],
    adapter: &dyn FormatAdapter,
) -> Vec<EdgeMapping> {
    let mut seq = 0usize;
    let mut by_edge: BTreeMap<EdgeId, Vec<NormalizedFragment>> = BTreeMap::new();

    for (feature, projections) in projected {
        // Recognize keys once per feature; they do not vary per edge.
        let mut recognized = Vec::with_capacity(feature.attributes().len());
        for (raw_key, raw_value) in feature.attributes() {
            match adapter.canonical_attribute_name(raw_key) {
                Some((attribute, side)) => recognized.push((attribute, side, raw_value)),
                None => {
                    debug!(
                        feature = %feature.id(),
                        key = raw_key.as_str(),
                        "attribute key not recognized by adapter, skipping"
                    );
                }
            }
        }

        for projection in projections {
            for &(attribute, side, raw_value) in &recognized {
                by_edge
                    .entry(projection.edge_id)
                    .or_default()
                    .push(NormalizedFragment {
                        attribute,
                        raw_value: raw_value.clone(),
                        range: projection.range,
                        side,
                        geometry: Arc::clone(&projection.geometry),
                        reversed: projection.reversed,
                        seq,
                    });
                seq += 1;
            }
        }
    }

    by_edge
        .into_iter()
        .map(|(edge_id, fragments)| EdgeMapping { edge_id, fragments })
        .collect()
}
