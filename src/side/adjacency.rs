//! Parallel-edge adjacency lookup.

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

use crate::network::NetworkEdge;

type IndexedBox = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Spatial collaborator answering "which edges run near this edge".
///
/// Implementations return nearby candidates only; the side resolver does the
/// parallelism and side classification itself.
pub trait AdjacencyProvider: Send + Sync {
    /// Edges whose bounding box lies within `buffer_m` of `edge`'s, the edge
    /// itself excluded.
    fn neighbours<'a>(&'a self, edge: &NetworkEdge, buffer_m: f64) -> Vec<&'a NetworkEdge>;
}

/// R-tree backed adjacency index over a run's working set.
///
/// Built once per run from pre-merge copies; only geometry is consulted, so
/// attribute mutation during the merge does not invalidate it.
pub struct RTreeAdjacencyIndex {
    tree: RTree<IndexedBox>,
    edges: Vec<NetworkEdge>,
}

impl RTreeAdjacencyIndex {
    /// Build the index over `edges`.
    pub fn new(edges: Vec<NetworkEdge>) -> Self {
        let boxes = edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let bb = e.bbox();
                GeomWithData::new(
                    Rectangle::from_corners([bb.min.x, bb.min.y], [bb.max.x, bb.max.y]),
                    i,
                )
            })
            .collect();
        Self {
            tree: RTree::bulk_load(boxes),
            edges,
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl AdjacencyProvider for RTreeAdjacencyIndex {
    fn neighbours<'a>(&'a self, edge: &NetworkEdge, buffer_m: f64) -> Vec<&'a NetworkEdge> {
        let bb = edge.bbox().buffered(buffer_m);
        let envelope = AABB::from_corners([bb.min.x, bb.min.y], [bb.max.x, bb.max.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|hit| &self.edges[hit.data])
            .filter(|e| e.id() != edge.id())
            .collect()
    }
}
