//! The format adapter contract.

use crate::merge::ApplyTarget;
use crate::network::SegmentSide;
use crate::range::LinearRange;
use crate::side::SideResult;

use super::attributes::CanonicalAttribute;
use super::value::{AttributeValue, NormalizedValue};

/// Translation layer between one external delivery format and the canonical
/// attribute model.
///
/// Implementors translate raw keys and values into canonical form and answer
/// the capability questions for the attributes they recognize. The capability
/// defaults delegate to the registry and rarely need overriding; the
/// application entry points are provided and route a translated value into
/// the merge machinery.
pub trait FormatAdapter: Send + Sync {
    /// Returns the format's name for logging and identification.
    fn name(&self) -> &str;

    /// Translates a raw attribute key into the canonical attribute it feeds,
    /// together with an explicit side tag when the key carries one
    /// (`surface:left` in the internal format).
    ///
    /// # Returns
    ///
    /// `None` when the key means nothing in this format; such attributes are
    /// skipped upstream.
    fn canonical_attribute_name(
        &self,
        raw_key: &str,
    ) -> Option<(CanonicalAttribute, Option<SideResult>)>;

    /// Translates a raw value into canonical form.
    ///
    /// # Returns
    ///
    /// [`NormalizedValue::Missing`] for the format's explicit no-data
    /// markers, [`NormalizedValue::Invalid`] for values the format does not
    /// define, [`NormalizedValue::Value`] otherwise.
    fn normalize_value(&self, attribute: CanonicalAttribute, raw: &str) -> NormalizedValue;

    /// Whether the raw key names an attribute this format understands.
    fn is_attribute_name_valid(&self, raw_key: &str) -> bool {
        self.canonical_attribute_name(raw_key).is_some()
    }

    /// Whether the raw value is well-formed for the attribute in this format.
    fn is_attribute_value_valid(&self, attribute: CanonicalAttribute, raw: &str) -> bool {
        matches!(
            self.normalize_value(attribute, raw),
            NormalizedValue::Value(_)
        )
    }

    /// Whether values of this attribute carry a linear reference.
    fn is_linearly_referenced(&self, attribute: CanonicalAttribute) -> bool {
        attribute.is_linearly_referenced()
    }

    /// Whether this attribute can differ between the two sides of a way.
    fn is_side_dependent(&self, attribute: CanonicalAttribute) -> bool {
        attribute.is_side_dependent()
    }

    /// Whether this attribute's values are relative to digitisation
    /// direction.
    fn is_direction_attribute(&self, attribute: CanonicalAttribute) -> bool {
        attribute.is_direction_attribute()
    }

    /// Inverts a direction-dependent value for fragments running against the
    /// edge's digitisation direction. Non-direction attributes pass through
    /// unchanged.
    fn invert_direction_value(
        &self,
        attribute: CanonicalAttribute,
        value: AttributeValue,
    ) -> AttributeValue {
        if !self.is_direction_attribute(attribute) {
            return value;
        }
        match value {
            AttributeValue::CarriagewaySide(side) => {
                AttributeValue::CarriagewaySide(side.inverted())
            }
            other => other,
        }
    }

    /// Orders attributes for application: primaries before the attributes
    /// whose validity depends on them.
    fn sort_attributes(&self, attributes: &mut [CanonicalAttribute]) {
        attributes.sort_by_key(|a| a.application_rank());
    }

    /// Applies a value with no linear reference over the whole edge.
    fn apply_single(&self, target: &mut ApplyTarget<'_>, value: AttributeValue) {
        self.apply_both_sides(target, LinearRange::full(), value);
    }

    /// Applies a ranged value to both sides of a two-sided edge, or to the
    /// single sequence otherwise.
    fn apply_both_sides(
        &self,
        target: &mut ApplyTarget<'_>,
        range: LinearRange,
        value: AttributeValue,
    ) {
        if target.is_two_sided() {
            target.write(range, Some(SegmentSide::Left), value);
            target.write(range, Some(SegmentSide::Right), value);
        } else {
            target.write(range, None, value);
        }
    }

    /// Applies a ranged value to one resolved side. `None` addresses the
    /// single sequence of a one-sided edge.
    fn apply_linear_range(
        &self,
        target: &mut ApplyTarget<'_>,
        range: LinearRange,
        side: Option<SegmentSide>,
        value: AttributeValue,
    ) {
        target.write(range, side, value);
    }
}
