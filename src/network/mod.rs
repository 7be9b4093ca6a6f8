//! The edge data model and its persistence contract.
//!
//! A [`NetworkEdge`] is the aggregate the engine mutates: directed geometry
//! plus one [`AttributeSegmentGroup`] per conflated attribute. The
//! [`EdgeStore`] trait is the boundary to whatever owns the canonical
//! network; [`InMemoryEdgeStore`] is the crate-shipped reference
//! implementation.

mod edge;
mod store;

pub use edge::{AttributeSegmentGroup, AttributeSegments, EdgeId, NetworkEdge, SegmentSide};
pub use store::{EdgeStore, InMemoryEdgeStore, StoreError};
