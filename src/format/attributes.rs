//! The canonical attribute registry.
//!
//! Every format adapter translates its raw keys into one of these attributes;
//! the merge engine and the edge data model only ever see canonical names.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::{
    AttributeValue, CarriagewaySide, NormalizedValue, PathType, SafetyStrip, Surface,
};

/// Maximum plausible usable width in metres; larger values are data errors.
const MAX_WIDTH_M: f64 = 50.0;

/// The attributes the engine conflates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalAttribute {
    /// Surface material.
    Surface,
    /// Cycle-path category; primary of the cross-attribute validation.
    PathType,
    /// Separation between cycleway and carriageway; depends on `PathType`.
    SafetyStrip,
    /// Usable width in metres.
    Width,
    /// Which carriageway side the path runs on; direction-valued.
    CarriagewaySide,
}

impl CanonicalAttribute {
    /// All attributes, in registry order.
    pub const ALL: [CanonicalAttribute; 5] = [
        CanonicalAttribute::Surface,
        CanonicalAttribute::PathType,
        CanonicalAttribute::SafetyStrip,
        CanonicalAttribute::Width,
        CanonicalAttribute::CarriagewaySide,
    ];

    /// Canonical name of the attribute.
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalAttribute::Surface => "surface",
            CanonicalAttribute::PathType => "path_type",
            CanonicalAttribute::SafetyStrip => "safety_strip",
            CanonicalAttribute::Width => "width",
            CanonicalAttribute::CarriagewaySide => "carriageway_side",
        }
    }

    /// Look an attribute up by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Whether values of this attribute apply to sub-extents of an edge.
    /// Attributes that are not linearly referenced always cover `[0, 1]`.
    pub fn is_linearly_referenced(&self) -> bool {
        true
    }

    /// Whether values of this attribute differ per side of the edge.
    pub fn is_side_dependent(&self) -> bool {
        !matches!(self, CanonicalAttribute::CarriagewaySide)
    }

    /// Whether values of this attribute are relative to the stationing
    /// direction and must be inverted for reversed fragments.
    pub fn is_direction_attribute(&self) -> bool {
        matches!(self, CanonicalAttribute::CarriagewaySide)
    }

    /// Application priority: attributes with dependents come before their
    /// dependents, so validators see up-to-date primary state.
    pub fn application_rank(&self) -> u8 {
        match self {
            CanonicalAttribute::PathType => 0,
            CanonicalAttribute::Surface => 1,
            CanonicalAttribute::Width => 2,
            CanonicalAttribute::CarriagewaySide => 3,
            CanonicalAttribute::SafetyStrip => 4,
        }
    }

    /// Parse a raw value in the canonical vocabulary.
    ///
    /// Empty or whitespace-only input is `Missing`; anything outside the
    /// attribute's vocabulary is `Invalid`.
    pub fn parse_value(&self, raw: &str) -> NormalizedValue {
        let raw = raw.trim();
        if raw.is_empty() {
            return NormalizedValue::Missing;
        }
        let invalid = || NormalizedValue::Invalid {
            raw: raw.to_string(),
        };
        match self {
            CanonicalAttribute::Surface => raw
                .parse::<Surface>()
                .map(|v| NormalizedValue::Value(AttributeValue::Surface(v)))
                .unwrap_or_else(|_| invalid()),
            CanonicalAttribute::PathType => raw
                .parse::<PathType>()
                .map(|v| NormalizedValue::Value(AttributeValue::PathType(v)))
                .unwrap_or_else(|_| invalid()),
            CanonicalAttribute::SafetyStrip => raw
                .parse::<SafetyStrip>()
                .map(|v| NormalizedValue::Value(AttributeValue::SafetyStrip(v)))
                .unwrap_or_else(|_| invalid()),
            CanonicalAttribute::Width => match raw.parse::<f64>() {
                Ok(w) if w.is_finite() && w > 0.0 && w <= MAX_WIDTH_M => {
                    NormalizedValue::Value(AttributeValue::Width(w))
                }
                _ => invalid(),
            },
            CanonicalAttribute::CarriagewaySide => raw
                .parse::<CarriagewaySide>()
                .map(|v| NormalizedValue::Value(AttributeValue::CarriagewaySide(v)))
                .unwrap_or_else(|_| invalid()),
        }
    }

    /// Whether `raw` is a valid value in the canonical vocabulary.
    pub fn is_value_valid(&self, raw: &str) -> bool {
        matches!(self.parse_value(raw), NormalizedValue::Value(_))
    }
}

impl fmt::Display for CanonicalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
