//! Cross-attribute validation rules.

use crate::format::{AttributeValue, CanonicalAttribute, PathType, SafetyStrip};

/// Path types a separation strip can physically exist on.
const STRIP_CAPABLE: [PathType; 3] = [
    PathType::SeparatedPath,
    PathType::CycleLane,
    PathType::AdvisoryLane,
];

/// The primary attribute whose state governs `attribute`'s validity.
pub(super) fn primary_of(attribute: CanonicalAttribute) -> Option<CanonicalAttribute> {
    match attribute {
        CanonicalAttribute::SafetyStrip => Some(CanonicalAttribute::PathType),
        _ => None,
    }
}

/// Whether `value` may be written over a stretch whose primary attribute
/// currently holds `primary`.
///
/// Only positively contradictory combinations are rejected: an unset primary
/// never blocks, and `SafetyStrip::None` asserts an absence that is
/// compatible with any path type.
pub(super) fn is_compatible(
    attribute: CanonicalAttribute,
    value: AttributeValue,
    primary: AttributeValue,
) -> bool {
    match (attribute, value, primary) {
        (
            CanonicalAttribute::SafetyStrip,
            AttributeValue::SafetyStrip(strip),
            AttributeValue::PathType(path_type),
        ) => strip == SafetyStrip::None || STRIP_CAPABLE.contains(&path_type),
        _ => true,
    }
}
