//! Road agency shapefile delivery format.

use super::adapter::FormatAdapter;
use super::attributes::CanonicalAttribute;
use super::value::{
    AttributeValue, CarriagewaySide, NormalizedValue, PathType, SafetyStrip, Surface,
};
use crate::side::SideResult;

/// Adapter for the road agency's shapefile deliveries.
///
/// Attribute keys are DBF column names (upper-case, at most 10 characters)
/// and values are the agency's numeric and letter code tables. Empty fields
/// and the agency's `-1` marker mean "not recorded" and normalize to
/// [`NormalizedValue::Missing`]; codes outside the tables normalize to
/// [`NormalizedValue::Invalid`].
pub struct AgencyFormat;

impl AgencyFormat {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AgencyFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for AgencyFormat {
    fn name(&self) -> &str {
        "agency-shapefile"
    }

    fn canonical_attribute_name(
        &self,
        raw_key: &str,
    ) -> Option<(CanonicalAttribute, Option<SideResult>)> {
        // Column names never carry side tags; the side comes from geometry.
        // Canonical spellings are accepted alongside the DBF columns because
        // merge-time validation asks by canonical name.
        let attribute = match raw_key.trim().to_ascii_uppercase().as_str() {
            "SURFTYP" | "SURFACE" => CanonicalAttribute::Surface,
            "FACILITY" | "PATH_TYPE" => CanonicalAttribute::PathType,
            "SEPSTRIP" | "SAFETY_STRIP" => CanonicalAttribute::SafetyStrip,
            "WIDTH" => CanonicalAttribute::Width,
            "CWSIDE" | "CARRIAGEWAY_SIDE" => CanonicalAttribute::CarriagewaySide,
            _ => return None,
        };
        Some((attribute, None))
    }

    fn normalize_value(&self, attribute: CanonicalAttribute, raw: &str) -> NormalizedValue {
        let code = raw.trim();
        if code.is_empty() || code == "-1" {
            return NormalizedValue::Missing;
        }

        let value = match attribute {
            CanonicalAttribute::Surface => match code {
                "1" => Some(AttributeValue::Surface(Surface::Asphalt)),
                "2" => Some(AttributeValue::Surface(Surface::Concrete)),
                "3" => Some(AttributeValue::Surface(Surface::GravelBound)),
                "4" => Some(AttributeValue::Surface(Surface::Sett)),
                "5" => Some(AttributeValue::Surface(Surface::Unbound)),
                _ => None,
            },
            CanonicalAttribute::PathType => match code {
                "0" => Some(AttributeValue::PathType(PathType::Unknown)),
                "1" => Some(AttributeValue::PathType(PathType::SeparatedPath)),
                "2" => Some(AttributeValue::PathType(PathType::CycleLane)),
                "3" => Some(AttributeValue::PathType(PathType::AdvisoryLane)),
                "4" => Some(AttributeValue::PathType(PathType::SharedFootway)),
                "5" => Some(AttributeValue::PathType(PathType::MixedTraffic)),
                _ => None,
            },
            CanonicalAttribute::SafetyStrip => match code {
                "0" => Some(AttributeValue::SafetyStrip(SafetyStrip::None)),
                "1" => Some(AttributeValue::SafetyStrip(SafetyStrip::GreenStrip)),
                "2" => Some(AttributeValue::SafetyStrip(SafetyStrip::KerbSeparation)),
                "3" => Some(AttributeValue::SafetyStrip(SafetyStrip::ParkingLane)),
                _ => None,
            },
            // Width codes are plain decimal metres, same as canonical.
            CanonicalAttribute::Width => return attribute.parse_value(code),
            CanonicalAttribute::CarriagewaySide => {
                match code.to_ascii_uppercase().as_str() {
                    "L" => Some(AttributeValue::CarriagewaySide(CarriagewaySide::Left)),
                    "R" => Some(AttributeValue::CarriagewaySide(CarriagewaySide::Right)),
                    "B" => Some(AttributeValue::CarriagewaySide(CarriagewaySide::Both)),
                    _ => None,
                }
            }
        };

        match value {
            Some(v) => NormalizedValue::Value(v),
            None => NormalizedValue::Invalid {
                raw: raw.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_name() {
        assert_eq!(AgencyFormat::new().name(), "agency-shapefile");
    }

    #[test]
    fn test_column_names_map_to_canonical() {
        let format = AgencyFormat::new();
        assert_eq!(
            format.canonical_attribute_name("SURFTYP"),
            Some((CanonicalAttribute::Surface, None))
        );
        assert_eq!(
            format.canonical_attribute_name("facility"),
            Some((CanonicalAttribute::PathType, None))
        );
        assert_eq!(format.canonical_attribute_name("OBJECTID"), None);
    }

    #[test]
    fn test_surface_codes() {
        let format = AgencyFormat::new();
        assert_eq!(
            format.normalize_value(CanonicalAttribute::Surface, "1"),
            NormalizedValue::Value(AttributeValue::Surface(Surface::Asphalt))
        );
        assert_eq!(
            format.normalize_value(CanonicalAttribute::Surface, "5"),
            NormalizedValue::Value(AttributeValue::Surface(Surface::Unbound))
        );
        assert_eq!(
            format.normalize_value(CanonicalAttribute::Surface, "9"),
            NormalizedValue::Invalid {
                raw: "9".to_string()
            }
        );
    }

    #[test]
    fn test_no_data_markers() {
        let format = AgencyFormat::new();
        assert_eq!(
            format.normalize_value(CanonicalAttribute::Surface, ""),
            NormalizedValue::Missing
        );
        assert_eq!(
            format.normalize_value(CanonicalAttribute::PathType, " -1 "),
            NormalizedValue::Missing
        );
    }

    #[test]
    fn test_facility_zero_is_unknown_path_type() {
        let format = AgencyFormat::new();
        assert_eq!(
            format.normalize_value(CanonicalAttribute::PathType, "0"),
            NormalizedValue::Value(AttributeValue::PathType(PathType::Unknown))
        );
    }

    #[test]
    fn test_width_decimal() {
        let format = AgencyFormat::new();
        assert_eq!(
            format.normalize_value(CanonicalAttribute::Width, "3.25"),
            NormalizedValue::Value(AttributeValue::Width(3.25))
        );
        assert!(matches!(
            format.normalize_value(CanonicalAttribute::Width, "wide"),
            NormalizedValue::Invalid { .. }
        ));
    }

    #[test]
    fn test_carriageway_side_letters() {
        let format = AgencyFormat::new();
        assert_eq!(
            format.normalize_value(CanonicalAttribute::CarriagewaySide, "L"),
            NormalizedValue::Value(AttributeValue::CarriagewaySide(CarriagewaySide::Left))
        );
        assert_eq!(
            format.normalize_value(CanonicalAttribute::CarriagewaySide, "b"),
            NormalizedValue::Value(AttributeValue::CarriagewaySide(CarriagewaySide::Both))
        );
        assert!(matches!(
            format.normalize_value(CanonicalAttribute::CarriagewaySide, "X"),
            NormalizedValue::Invalid { .. }
        ));
    }

    #[test]
    fn test_value_validity_follows_normalization() {
        let format = AgencyFormat::new();
        assert!(format.is_attribute_value_valid(CanonicalAttribute::Surface, "3"));
        assert!(!format.is_attribute_value_valid(CanonicalAttribute::Surface, "asphalt"));
        assert!(!format.is_attribute_value_valid(CanonicalAttribute::Surface, ""));
    }
}
