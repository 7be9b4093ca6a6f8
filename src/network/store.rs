//! Persistence contract for network edges.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use thiserror::Error;

use super::edge::{EdgeId, NetworkEdge};
use crate::geom::BoundingBox;

/// Errors from the persistence boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// No edge with the requested id.
    #[error("edge {0} not found")]
    NotFound(EdgeId),
    /// The edge changed since it was loaded.
    #[error("version conflict on edge {edge}: expected {expected}, found {found}")]
    VersionConflict {
        edge: EdgeId,
        expected: u64,
        found: u64,
    },
}

impl StoreError {
    /// Whether retrying the whole batch with freshly loaded edges can
    /// succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::VersionConflict { .. })
    }
}

/// Storage collaborator owning the canonical edge state.
///
/// Loads hand out detached clones; a run mutates those clones and writes
/// them back as a unit. Replacement is optimistic: the stored version must
/// still equal the copy's loaded version, otherwise the batch aborts with a
/// retryable error and nothing is written.
pub trait EdgeStore: Send + Sync {
    /// Load a detached copy of an edge.
    fn load(&self, id: EdgeId) -> Result<NetworkEdge, StoreError>;

    /// Detached copies of all edges whose bounding box intersects `bbox`.
    fn query_bbox(&self, bbox: &BoundingBox) -> Result<Vec<NetworkEdge>, StoreError>;

    /// Replace one edge, bumping the stored version on success.
    ///
    /// # Errors
    ///
    /// [`StoreError::VersionConflict`] when the stored version differs from
    /// the copy's loaded version.
    fn replace(&self, edge: NetworkEdge) -> Result<(), StoreError>;

    /// Replace a batch of edges, failing before any write when some version
    /// no longer matches.
    ///
    /// The default implementation checks every version first and then
    /// replaces one by one; backends with real transactions should override
    /// it with an atomic swap.
    fn replace_all(&self, edges: Vec<NetworkEdge>) -> Result<(), StoreError> {
        for edge in &edges {
            let current = self.load(edge.id())?;
            if current.version() != edge.version() {
                return Err(StoreError::VersionConflict {
                    edge: edge.id(),
                    expected: edge.version(),
                    found: current.version(),
                });
            }
        }
        for edge in edges {
            self.replace(edge)?;
        }
        Ok(())
    }
}

/// In-memory reference implementation of [`EdgeStore`].
///
/// Backs the integration tests and small embeddings; everything lives under
/// one lock, so `replace_all` really is all-or-nothing.
#[derive(Debug, Default)]
pub struct InMemoryEdgeStore {
    edges: RwLock<BTreeMap<EdgeId, NetworkEdge>>,
}

impl InMemoryEdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an edge, replacing stored state unconditionally.
    pub fn insert(&self, edge: NetworkEdge) {
        self.edges.write().insert(edge.id(), edge);
    }

    pub fn len(&self) -> usize {
        self.edges.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.read().is_empty()
    }
}

impl EdgeStore for InMemoryEdgeStore {
    fn load(&self, id: EdgeId) -> Result<NetworkEdge, StoreError> {
        self.edges
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn query_bbox(&self, bbox: &BoundingBox) -> Result<Vec<NetworkEdge>, StoreError> {
        Ok(self
            .edges
            .read()
            .values()
            .filter(|e| e.bbox().intersects(bbox))
            .cloned()
            .collect())
    }

    fn replace(&self, mut edge: NetworkEdge) -> Result<(), StoreError> {
        let mut stored = self.edges.write();
        let current = stored
            .get(&edge.id())
            .ok_or(StoreError::NotFound(edge.id()))?;
        if current.version() != edge.version() {
            return Err(StoreError::VersionConflict {
                edge: edge.id(),
                expected: edge.version(),
                found: current.version(),
            });
        }
        edge.set_version(edge.version() + 1);
        stored.insert(edge.id(), edge);
        Ok(())
    }

    fn replace_all(&self, edges: Vec<NetworkEdge>) -> Result<(), StoreError> {
        let mut stored = self.edges.write();
        for edge in &edges {
            let current = stored
                .get(&edge.id())
                .ok_or(StoreError::NotFound(edge.id()))?;
            if current.version() != edge.version() {
                return Err(StoreError::VersionConflict {
                    edge: edge.id(),
                    expected: edge.version(),
                    found: current.version(),
                });
            }
        }
        for mut edge in edges {
            edge.set_version(edge.version() + 1);
            stored.insert(edge.id(), edge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::CanonicalAttribute;
    use crate::geom::{Point, Polyline};

    fn edge(id: u64) -> NetworkEdge {
        let line = Polyline::new(vec![
            Point::new(id as f64 * 1000.0, 0.0),
            Point::new(id as f64 * 1000.0 + 100.0, 0.0),
        ])
        .unwrap();
        NetworkEdge::new(EdgeId(id), line, false)
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let store = InMemoryEdgeStore::new();
        assert_eq!(store.load(EdgeId(9)), Err(StoreError::NotFound(EdgeId(9))));
    }

    #[test]
    fn test_load_hands_out_detached_copy() {
        let store = InMemoryEdgeStore::new();
        store.insert(edge(1));

        let mut copy = store.load(EdgeId(1)).unwrap();
        copy.group_mut(CanonicalAttribute::Surface);

        // The stored edge is untouched by mutation of the copy.
        assert!(store.load(EdgeId(1)).unwrap().groups().is_empty());
    }

    #[test]
    fn test_replace_bumps_version() {
        let store = InMemoryEdgeStore::new();
        store.insert(edge(1));

        let copy = store.load(EdgeId(1)).unwrap();
        assert_eq!(copy.version(), 0);
        store.replace(copy).unwrap();
        assert_eq!(store.load(EdgeId(1)).unwrap().version(), 1);
    }

    #[test]
    fn test_replace_stale_version_conflicts() {
        let store = InMemoryEdgeStore::new();
        store.insert(edge(1));

        let stale = store.load(EdgeId(1)).unwrap();
        store.replace(store.load(EdgeId(1)).unwrap()).unwrap();

        let err = store.replace(stale).unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_replace_all_aborts_before_any_write() {
        let store = InMemoryEdgeStore::new();
        store.insert(edge(1));
        store.insert(edge(2));

        let fresh_1 = store.load(EdgeId(1)).unwrap();
        let stale_2 = store.load(EdgeId(2)).unwrap();
        // Edge 2 moves on underneath the batch.
        store.replace(store.load(EdgeId(2)).unwrap()).unwrap();

        let err = store.replace_all(vec![fresh_1, stale_2]).unwrap_err();
        assert!(err.is_retryable());
        // Edge 1 was not written: its version is still 0.
        assert_eq!(store.load(EdgeId(1)).unwrap().version(), 0);
    }

    #[test]
    fn test_replace_all_bumps_all_versions() {
        let store = InMemoryEdgeStore::new();
        store.insert(edge(1));
        store.insert(edge(2));

        let batch = vec![
            store.load(EdgeId(1)).unwrap(),
            store.load(EdgeId(2)).unwrap(),
        ];
        store.replace_all(batch).unwrap();
        assert_eq!(store.load(EdgeId(1)).unwrap().version(), 1);
        assert_eq!(store.load(EdgeId(2)).unwrap().version(), 1);
    }

    #[test]
    fn test_query_bbox_filters_by_extent() {
        let store = InMemoryEdgeStore::new();
        store.insert(edge(1));
        store.insert(edge(2));

        let near_first = BoundingBox::new(
            Point::new(900.0, -10.0),
            Point::new(1200.0, 10.0),
        );
        let hits = store.query_bbox(&near_first).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), EdgeId(1));
    }
}
