//! Side-of-way resolution.
//!
//! Determines which side of a network edge an imported feature line lies on.
//! [`SideResolver`] votes over sampled cross products and only commits to an
//! answer when the vote is dominant; [`AdjacencyProvider`] supplies the
//! parallel-edge fallback used when the geometry itself is mute, with
//! [`RTreeAdjacencyIndex`] as the per-run spatial implementation.

mod adjacency;
mod resolver;

pub use adjacency::{AdjacencyProvider, RTreeAdjacencyIndex};
pub use resolver::{SideResolver, SideResult};
