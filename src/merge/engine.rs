//! The merge engine.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::config::ConflationConfig;
use crate::conflict::{Conflict, ConflictKind, ConflictProtocol};
use crate::format::{CanonicalAttribute, FormatAdapter, NormalizedValue};
use crate::mapping::{EdgeMapping, NormalizedFragment};
use crate::network::{NetworkEdge, SegmentSide};
use crate::range::LinearRange;
use crate::side::{AdjacencyProvider, SideResolver, SideResult};

use super::apply::ApplyTarget;
use super::overlay::RunOverlay;

/// Fatal merge failures.
///
/// Semantic disagreements are conflicts, never errors; this only covers
/// conditions upstream validation is supposed to rule out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A mapping named an attribute the session's adapter does not handle.
    #[error("format {adapter} does not recognize attribute {attribute}")]
    UnknownAttribute { adapter: String, attribute: String },
}

/// Applies one edge's fragments in deterministic order.
///
/// Attribute order comes from the adapter (primaries before dependents so
/// validators see up-to-date state), fragment order within an attribute from
/// the import sequence. Each edge is merged by exactly one engine call, so
/// the last-wins policy is well defined.
pub struct MergeEngine {
    adapter: Arc<dyn FormatAdapter>,
    config: ConflationConfig,
    resolver: SideResolver,
}

impl MergeEngine {
    pub fn new(adapter: Arc<dyn FormatAdapter>, config: ConflationConfig) -> Self {
        let resolver = SideResolver::new(config.side());
        Self {
            adapter,
            config,
            resolver,
        }
    }

    /// Merge all fragments of `mapping` into `edge`, mutating it in place.
    ///
    /// Conflicts land in `protocol`. Every touched attribute and side still
    /// tiles `[0, 1]` afterwards.
    pub fn merge_mapping(
        &self,
        edge: &mut NetworkEdge,
        mapping: &EdgeMapping,
        adjacency: &dyn AdjacencyProvider,
        protocol: &mut ConflictProtocol,
    ) -> Result<(), MergeError> {
        let mut overlay = RunOverlay::new();

        let mut attributes: Vec<CanonicalAttribute> = Vec::new();
        for fragment in &mapping.fragments {
            if !attributes.contains(&fragment.attribute) {
                attributes.push(fragment.attribute);
            }
        }
        self.adapter.sort_attributes(&mut attributes);

        for attribute in attributes {
            self.merge_attribute(edge, mapping, attribute, adjacency, protocol, &mut overlay)?;
        }
        Ok(())
    }

    fn merge_attribute(
        &self,
        edge: &mut NetworkEdge,
        mapping: &EdgeMapping,
        attribute: CanonicalAttribute,
        adjacency: &dyn AdjacencyProvider,
        protocol: &mut ConflictProtocol,
        overlay: &mut RunOverlay,
    ) -> Result<(), MergeError> {
        if !self.adapter.is_attribute_name_valid(attribute.name()) {
            return Err(MergeError::UnknownAttribute {
                adapter: self.adapter.name().to_string(),
                attribute: attribute.name().to_string(),
            });
        }

        let mut fragments: Vec<&NormalizedFragment> = mapping
            .fragments
            .iter()
            .filter(|f| f.attribute == attribute)
            .collect();
        fragments.sort_by_key(|f| f.seq);

        let eps = self.config.tolerance().snap_eps();
        for fragment in fragments {
            self.apply_fragment(edge, fragment, attribute, adjacency, protocol, overlay, eps);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_fragment(
        &self,
        edge: &mut NetworkEdge,
        fragment: &NormalizedFragment,
        attribute: CanonicalAttribute,
        adjacency: &dyn AdjacencyProvider,
        protocol: &mut ConflictProtocol,
        overlay: &mut RunOverlay,
        eps: f64,
    ) {
        let value = match self.adapter.normalize_value(attribute, &fragment.raw_value) {
            NormalizedValue::Missing => {
                // No-null-overwrite: blank incoming values never erase data.
                debug!(
                    edge = %edge.id(),
                    attribute = %attribute,
                    "missing value, nothing to write"
                );
                return;
            }
            NormalizedValue::Invalid { raw } => {
                protocol.record(Conflict {
                    kind: ConflictKind::InvalidValue,
                    attribute,
                    range: fragment.range,
                    side: None,
                    adopted: None,
                    rejected: vec![raw],
                    message: format!(
                        "{:?} is not a valid {} value in format {}",
                        fragment.raw_value,
                        attribute,
                        self.adapter.name()
                    ),
                });
                return;
            }
            NormalizedValue::Value(value) => value,
        };

        let value = if fragment.reversed {
            self.adapter.invert_direction_value(attribute, value)
        } else {
            value
        };

        let resolved = if self.adapter.is_side_dependent(attribute) {
            match fragment.side {
                Some(tag) => tag,
                None => self
                    .resolver
                    .resolve_with_fallback(&fragment.geometry, edge, adjacency),
            }
        } else {
            SideResult::Both
        };

        if resolved == SideResult::Undetermined && !edge.two_sided() {
            // The fragment might belong to a parallel way; refuse to guess.
            protocol.record(Conflict {
                kind: ConflictKind::AmbiguousSide,
                attribute,
                range: fragment.range,
                side: None,
                adopted: None,
                rejected: vec![value.to_string()],
                message: format!(
                    "side of way for {} {} could not be determined over {}, write skipped",
                    attribute, value, fragment.range
                ),
            });
            return;
        }

        let ranged = self.adapter.is_linearly_referenced(attribute);
        let range = if ranged {
            fragment.range
        } else {
            LinearRange::full()
        };

        let mut target = ApplyTarget::new(edge, attribute, overlay, protocol, eps);
        match resolved {
            SideResult::Left | SideResult::Right if !target.is_two_sided() => {
                self.adapter
                    .apply_linear_range(&mut target, range, None, value);
            }
            SideResult::Left => {
                self.adapter
                    .apply_linear_range(&mut target, range, Some(SegmentSide::Left), value);
            }
            SideResult::Right => {
                self.adapter
                    .apply_linear_range(&mut target, range, Some(SegmentSide::Right), value);
            }
            SideResult::Both | SideResult::Undetermined => {
                if ranged {
                    self.adapter.apply_both_sides(&mut target, range, value);
                } else {
                    self.adapter.apply_single(&mut target, value);
                }
            }
        }
    }
}
