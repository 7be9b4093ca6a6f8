//! Projection of matched feature geometry onto edge linear references.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::feature::ImportedFeature;
use crate::geom::Polyline;
use crate::network::{EdgeId, NetworkEdge};
use crate::range::LinearRange;

use super::matching::FeatureMatch;

/// One feature fragment expressed in an edge's linear reference.
#[derive(Debug, Clone)]
pub struct EdgeProjection {
    pub edge_id: EdgeId,
    pub range: LinearRange,
    /// Clipped overlap geometry backing this fragment, shared by every
    /// normalized fragment derived from it.
    pub geometry: Arc<Polyline>,
    /// True when the feature runs against the edge's digitisation direction.
    pub reversed: bool,
}

/// Project a matched feature onto every edge its overlap runs along.
///
/// Each candidate edge receives the stretch of the overlap geometry running
/// alongside it, found by projecting the edge endpoints onto the overlap line
/// and cutting the substring between the two stations. The clipped endpoints
/// are then projected back onto the edge to fractional stations, swapped (and
/// flagged `reversed`) when the feature runs against the edge direction, and
/// normalized with `eps`. A feature spanning several consecutive edges yields
/// one independently-ranged projection per edge; fragments that collapse
/// below `eps` are dropped.
pub fn project_feature(
    feature: &ImportedFeature,
    matched: &FeatureMatch,
    edges: &BTreeMap<EdgeId, NetworkEdge>,
    eps: f64,
) -> Vec<EdgeProjection> {
    let mut projections = Vec::with_capacity(matched.edge_ids.len());
    for &edge_id in &matched.edge_ids {
        let edge = match edges.get(&edge_id) {
            Some(edge) => edge,
            None => {
                debug!(
                    feature = %feature.id(),
                    edge = %edge_id,
                    "matched edge missing from working set, skipping"
                );
                continue;
            }
        };

        let s0 = matched.overlap.nearest_point(edge.geometry().first()).station;
        let s1 = matched.overlap.nearest_point(edge.geometry().last()).station;
        let clipped = match matched.overlap.substring(s0.min(s1), s0.max(s1)) {
            Ok(line) => line,
            Err(err) => {
                debug!(
                    feature = %feature.id(),
                    edge = %edge_id,
                    %err,
                    "overlap clip degenerate, skipping"
                );
                continue;
            }
        };

        let length = edge.length();
        let f0 = edge.geometry().nearest_point(clipped.first()).station / length;
        let f1 = edge.geometry().nearest_point(clipped.last()).station / length;
        let reversed = f0 > f1;
        let (lo, hi) = if reversed { (f1, f0) } else { (f0, f1) };

        match LinearRange::normalized(lo, hi, eps) {
            Ok(range) => projections.push(EdgeProjection {
                edge_id,
                range,
                geometry: Arc::new(clipped),
                reversed,
            }),
            Err(err) => {
                debug!(
                    feature = %feature.id(),
                    edge = %edge_id,
                    %err,
                    "projection collapsed below tolerance, skipping"
                );
            }
        }
    }
    projections
}
