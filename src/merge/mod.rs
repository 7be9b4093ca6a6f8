//! Attribute merging.
//!
//! The heart of the engine: [`MergeEngine`] folds one edge's normalized
//! fragments into its segment state, applying attributes in dependency order
//! and fragments in import order. Every write goes through an
//! [`ApplyTarget`], which partitions the segment sequence, cross-validates
//! dependent attributes against their primary, and records conflicts when
//! writes of the same run disagree. Values that were on the edge before the
//! run are overwritten silently; only within-run overlaps conflict.

mod apply;
mod engine;
mod overlay;
mod rules;

pub use apply::ApplyTarget;
pub use engine::{MergeEngine, MergeError};
