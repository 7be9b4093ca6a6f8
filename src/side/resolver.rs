//! Geometric side-of-way resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SideConfig;
use crate::geom::Polyline;
use crate::network::NetworkEdge;

use super::adjacency::AdjacencyProvider;

/// Which side of an edge a feature line was resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideResult {
    Left,
    Right,
    /// Applies to both sides, e.g. a surface laid across the full way.
    Both,
    /// The geometry gave no usable answer.
    Undetermined,
}

impl fmt::Display for SideResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideResult::Left => write!(f, "left"),
            SideResult::Right => write!(f, "right"),
            SideResult::Both => write!(f, "both"),
            SideResult::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Resolves which side of an edge a feature line lies on.
///
/// Resolution samples points along the feature line, projects each onto the
/// edge and votes by the sign of the cross product between the local edge
/// direction and the offset to the sample. Points closer to the edge than the
/// on-line threshold abstain. The vote only wins when one side reaches the
/// configured dominance share; anything murkier is [`SideResult::Undetermined`]
/// so callers can fall back or flag a conflict instead of guessing.
pub struct SideResolver {
    config: SideConfig,
}

impl SideResolver {
    pub fn new(config: SideConfig) -> Self {
        Self { config }
    }

    /// Classify `feature_line` against `edge_line` by cross-product voting.
    ///
    /// Never returns [`SideResult::Both`]: a line strictly between the two
    /// sides does not exist geometrically, so "both" is a policy decision left
    /// to the caller (it is how `Undetermined` lands on two-sided edges).
    pub fn resolve(&self, feature_line: &Polyline, edge_line: &Polyline) -> SideResult {
        let mut left = 0usize;
        let mut right = 0usize;
        let mut on_line = 0usize;

        for sample in feature_line.sample_points(self.config.sample_count()) {
            let nearest = edge_line.nearest_point(sample);
            if nearest.distance < self.config.on_line_threshold_m() {
                on_line += 1;
                continue;
            }
            let dir = edge_line.segment_direction(nearest.segment);
            let cross = dir.cross(nearest.point.offset_to(sample));
            if cross > 0.0 {
                left += 1;
            } else if cross < 0.0 {
                right += 1;
            } else {
                on_line += 1;
            }
        }

        let total = left + right + on_line;
        if on_line * 2 > total {
            return SideResult::Undetermined;
        }

        // on_line is not a majority, so at least one sided vote exists.
        let sided = (left + right) as f64;
        if left as f64 / sided >= self.config.vote_dominance() {
            SideResult::Left
        } else if right as f64 / sided >= self.config.vote_dominance() {
            SideResult::Right
        } else {
            SideResult::Undetermined
        }
    }

    /// [`resolve`](Self::resolve), then the parallel-edge fallback when the
    /// geometric answer is `Undetermined` on a single-sided edge.
    ///
    /// Two-sided edges skip the fallback: their `Undetermined` already has a
    /// defined application (both sides), and a neighbour vote would only
    /// manufacture precision the geometry does not support.
    pub fn resolve_with_fallback(
        &self,
        feature_line: &Polyline,
        edge: &NetworkEdge,
        adjacency: &dyn AdjacencyProvider,
    ) -> SideResult {
        let geometric = self.resolve(feature_line, edge.geometry());
        if geometric != SideResult::Undetermined || edge.two_sided() {
            return geometric;
        }
        self.resolve_by_adjacency(edge, adjacency)
    }

    /// Infer the side from parallel neighbouring edges.
    ///
    /// A kerb-line feature drawn on top of a one-way cycle track often sits
    /// exactly on the edge, while the roadway it belongs beside runs parallel
    /// a few metres away. When exactly one side has such a parallel neighbour,
    /// the feature is taken to face it.
    fn resolve_by_adjacency(
        &self,
        edge: &NetworkEdge,
        adjacency: &dyn AdjacencyProvider,
    ) -> SideResult {
        let mut left = false;
        let mut right = false;
        for neighbour in adjacency.neighbours(edge, self.config.parallel_buffer_m()) {
            match self.classify_parallel(edge, neighbour) {
                Some(SideResult::Left) => left = true,
                Some(SideResult::Right) => right = true,
                _ => {}
            }
        }
        match (left, right) {
            (true, false) => SideResult::Left,
            (false, true) => SideResult::Right,
            _ => {
                debug!(
                    edge = %edge.id(),
                    left,
                    right,
                    "parallel-edge fallback inconclusive"
                );
                SideResult::Undetermined
            }
        }
    }

    /// Which side of `edge` a parallel `neighbour` runs on, if it qualifies.
    fn classify_parallel(
        &self,
        edge: &NetworkEdge,
        neighbour: &NetworkEdge,
    ) -> Option<SideResult> {
        let angle = chord_angle_deg(edge.geometry(), neighbour.geometry());
        if angle > self.config.parallel_angle_deg() {
            return None;
        }

        let midpoint = neighbour
            .geometry()
            .point_at(neighbour.geometry().length() / 2.0);
        let nearest = edge.geometry().nearest_point(midpoint);
        if nearest.distance > self.config.parallel_buffer_m() {
            return None;
        }
        // Coincident geometry is a duplicate, not a neighbour beside the edge.
        if nearest.distance < self.config.on_line_threshold_m() {
            return None;
        }

        let dir = edge.geometry().segment_direction(nearest.segment);
        let cross = dir.cross(nearest.point.offset_to(midpoint));
        if cross > 0.0 {
            Some(SideResult::Left)
        } else if cross < 0.0 {
            Some(SideResult::Right)
        } else {
            None
        }
    }
}

/// Acute angle in degrees between the first-to-last chords of two lines,
/// insensitive to digitisation direction.
fn chord_angle_deg(a: &Polyline, b: &Polyline) -> f64 {
    let da = a.first().offset_to(a.last());
    let db = b.first().offset_to(b.last());
    let (na, nb) = (da.norm(), db.norm());
    if na == 0.0 || nb == 0.0 {
        // A closed loop has no chord direction; treat it as not parallel.
        return 90.0;
    }
    let cos = (da.dot(db) / (na * nb)).abs().clamp(0.0, 1.0);
    cos.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::network::EdgeId;
    use crate::side::RTreeAdjacencyIndex;

    fn horizontal(y: f64) -> Polyline {
        Polyline::new(vec![Point::new(0.0, y), Point::new(100.0, y)]).unwrap()
    }

    fn resolver() -> SideResolver {
        SideResolver::new(SideConfig::default())
    }

    #[test]
    fn test_resolve_left_of_edge() {
        // Edge runs +x; positive y is to its left.
        let side = resolver().resolve(&horizontal(2.0), &horizontal(0.0));
        assert_eq!(side, SideResult::Left);
    }

    #[test]
    fn test_resolve_right_of_edge() {
        let side = resolver().resolve(&horizontal(-2.0), &horizontal(0.0));
        assert_eq!(side, SideResult::Right);
    }

    #[test]
    fn test_resolve_coincident_is_undetermined() {
        let side = resolver().resolve(&horizontal(0.0), &horizontal(0.0));
        assert_eq!(side, SideResult::Undetermined);
    }

    #[test]
    fn test_resolve_crossing_line_is_undetermined() {
        // Crosses the edge at its midpoint: votes split close to even.
        let crossing =
            Polyline::new(vec![Point::new(0.0, -5.0), Point::new(100.0, 5.0)]).unwrap();
        let side = resolver().resolve(&crossing, &horizontal(0.0));
        assert_eq!(side, SideResult::Undetermined);
    }

    #[test]
    fn test_resolve_reversed_edge_flips_side() {
        let reversed =
            Polyline::new(vec![Point::new(100.0, 0.0), Point::new(0.0, 0.0)]).unwrap();
        let side = resolver().resolve(&horizontal(2.0), &reversed);
        assert_eq!(side, SideResult::Right);
    }

    #[test]
    fn test_fallback_single_parallel_neighbour_wins() {
        let edge = NetworkEdge::new(EdgeId(1), horizontal(0.0), false);
        let neighbour = NetworkEdge::new(EdgeId(2), horizontal(8.0), false);
        let index = RTreeAdjacencyIndex::new(vec![edge.clone(), neighbour]);

        // Feature drawn on top of the edge: geometry alone gives nothing.
        let side = resolver().resolve_with_fallback(&horizontal(0.0), &edge, &index);
        assert_eq!(side, SideResult::Left);
    }

    #[test]
    fn test_fallback_neighbours_on_both_sides_stay_undetermined() {
        let edge = NetworkEdge::new(EdgeId(1), horizontal(0.0), false);
        let index = RTreeAdjacencyIndex::new(vec![
            edge.clone(),
            NetworkEdge::new(EdgeId(2), horizontal(8.0), false),
            NetworkEdge::new(EdgeId(3), horizontal(-8.0), false),
        ]);

        let side = resolver().resolve_with_fallback(&horizontal(0.0), &edge, &index);
        assert_eq!(side, SideResult::Undetermined);
    }

    #[test]
    fn test_fallback_ignores_perpendicular_neighbour() {
        let edge = NetworkEdge::new(EdgeId(1), horizontal(0.0), false);
        let crossing =
            Polyline::new(vec![Point::new(50.0, -10.0), Point::new(50.0, 10.0)]).unwrap();
        let index = RTreeAdjacencyIndex::new(vec![
            edge.clone(),
            NetworkEdge::new(EdgeId(2), crossing, false),
        ]);

        let side = resolver().resolve_with_fallback(&horizontal(0.0), &edge, &index);
        assert_eq!(side, SideResult::Undetermined);
    }

    #[test]
    fn test_fallback_skipped_on_two_sided_edge() {
        let edge = NetworkEdge::new(EdgeId(1), horizontal(0.0), true);
        let index = RTreeAdjacencyIndex::new(vec![
            edge.clone(),
            NetworkEdge::new(EdgeId(2), horizontal(8.0), false),
        ]);

        let side = resolver().resolve_with_fallback(&horizontal(0.0), &edge, &index);
        assert_eq!(side, SideResult::Undetermined);
    }

    #[test]
    fn test_geometric_answer_bypasses_fallback() {
        let edge = NetworkEdge::new(EdgeId(1), horizontal(0.0), false);
        // A right-side neighbour that would pull the fallback the other way.
        let index = RTreeAdjacencyIndex::new(vec![
            edge.clone(),
            NetworkEdge::new(EdgeId(2), horizontal(-8.0), false),
        ]);

        let side = resolver().resolve_with_fallback(&horizontal(3.0), &edge, &index);
        assert_eq!(side, SideResult::Left);
    }
}
