//! The application's own export format.

use super::adapter::FormatAdapter;
use super::attributes::CanonicalAttribute;
use super::value::NormalizedValue;
use crate::side::SideResult;

/// Adapter for the application's own exports.
///
/// Keys are the canonical attribute names, optionally side-suffixed
/// (`surface:left`, `width:both`) to carry an explicit side tag. Values use
/// the canonical vocabulary and are validated strictly; there are no code
/// tables to translate.
pub struct InternalFormat;

impl InternalFormat {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InternalFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for InternalFormat {
    fn name(&self) -> &str {
        "internal"
    }

    fn canonical_attribute_name(
        &self,
        raw_key: &str,
    ) -> Option<(CanonicalAttribute, Option<SideResult>)> {
        let key = raw_key.trim();
        let (name, side) = match key.split_once(':') {
            Some((name, tag)) => {
                let side = match tag {
                    "left" => SideResult::Left,
                    "right" => SideResult::Right,
                    "both" => SideResult::Both,
                    _ => return None,
                };
                (name, Some(side))
            }
            None => (key, None),
        };
        let attribute = CanonicalAttribute::from_name(name)?;
        // A side tag on a side-independent attribute is a malformed key.
        if side.is_some() && !attribute.is_side_dependent() {
            return None;
        }
        Some((attribute, side))
    }

    fn normalize_value(&self, attribute: CanonicalAttribute, raw: &str) -> NormalizedValue {
        attribute.parse_value(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::value::{AttributeValue, Surface};

    #[test]
    fn test_adapter_name() {
        assert_eq!(InternalFormat::new().name(), "internal");
    }

    #[test]
    fn test_plain_key() {
        assert_eq!(
            InternalFormat::new().canonical_attribute_name("surface"),
            Some((CanonicalAttribute::Surface, None))
        );
    }

    #[test]
    fn test_side_suffixed_keys() {
        let format = InternalFormat::new();
        assert_eq!(
            format.canonical_attribute_name("surface:left"),
            Some((CanonicalAttribute::Surface, Some(SideResult::Left)))
        );
        assert_eq!(
            format.canonical_attribute_name("width:both"),
            Some((CanonicalAttribute::Width, Some(SideResult::Both)))
        );
        assert_eq!(format.canonical_attribute_name("surface:up"), None);
    }

    #[test]
    fn test_side_tag_on_side_independent_attribute_rejected() {
        assert_eq!(
            InternalFormat::new().canonical_attribute_name("carriageway_side:left"),
            None
        );
    }

    #[test]
    fn test_values_are_strict_canonical() {
        let format = InternalFormat::new();
        assert_eq!(
            format.normalize_value(CanonicalAttribute::Surface, "asphalt"),
            NormalizedValue::Value(AttributeValue::Surface(Surface::Asphalt))
        );
        // Agency-style numeric codes mean nothing here.
        assert!(matches!(
            format.normalize_value(CanonicalAttribute::Surface, "1"),
            NormalizedValue::Invalid { .. }
        ));
        assert_eq!(
            format.normalize_value(CanonicalAttribute::Surface, ""),
            NormalizedValue::Missing
        );
    }
}
