//! Feature-to-edge projection.
//!
//! Turns matched feature geometry into fractional linear references on
//! network edges. Matching itself is an external collaborator behind
//! [`MatchProvider`]; this module owns what happens after a match: clipping
//! the overlap per edge and expressing it as an [`EdgeProjection`].

mod matching;
mod projector;

pub use matching::{FeatureMatch, MatchProvider, SearchContext};
pub use projector::{project_feature, EdgeProjection};
