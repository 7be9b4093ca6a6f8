//! Planar geometry primitives for the conflation engine.
//!
//! All geometry is 2-D and expressed in a projected coordinate reference
//! system with metre units (the coordinate system the source datasets are
//! delivered in). The module provides the polyline operations the projector
//! and the side resolver are built on: arc-length stationing, nearest-point
//! projection, substring extraction and equal-arc sampling.

mod polyline;
mod types;

pub use polyline::{NearestPoint, Polyline};
pub use types::{BoundingBox, GeometryError, Point};
