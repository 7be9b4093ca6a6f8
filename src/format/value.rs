//! Canonical attribute values and normalization results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Surface material of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Asphalt,
    Concrete,
    GravelBound,
    Sett,
    Unbound,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Asphalt => write!(f, "asphalt"),
            Surface::Concrete => write!(f, "concrete"),
            Surface::GravelBound => write!(f, "gravel_bound"),
            Surface::Sett => write!(f, "sett"),
            Surface::Unbound => write!(f, "unbound"),
        }
    }
}

impl FromStr for Surface {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asphalt" => Ok(Surface::Asphalt),
            "concrete" => Ok(Surface::Concrete),
            "gravel_bound" => Ok(Surface::GravelBound),
            "sett" => Ok(Surface::Sett),
            "unbound" => Ok(Surface::Unbound),
            _ => Err(()),
        }
    }
}

/// Category of cycle-path provision along an edge.
///
/// Primary attribute of the cross-attribute validation: safety-strip values
/// are only valid for the separated categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    SeparatedPath,
    CycleLane,
    AdvisoryLane,
    SharedFootway,
    MixedTraffic,
    Unknown,
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathType::SeparatedPath => write!(f, "separated_path"),
            PathType::CycleLane => write!(f, "cycle_lane"),
            PathType::AdvisoryLane => write!(f, "advisory_lane"),
            PathType::SharedFootway => write!(f, "shared_footway"),
            PathType::MixedTraffic => write!(f, "mixed_traffic"),
            PathType::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for PathType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "separated_path" => Ok(PathType::SeparatedPath),
            "cycle_lane" => Ok(PathType::CycleLane),
            "advisory_lane" => Ok(PathType::AdvisoryLane),
            "shared_footway" => Ok(PathType::SharedFootway),
            "mixed_traffic" => Ok(PathType::MixedTraffic),
            "unknown" => Ok(PathType::Unknown),
            _ => Err(()),
        }
    }
}

/// Kind of separation between a cycleway and the carriageway.
///
/// Dependent attribute: only valid alongside a compatible [`PathType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStrip {
    GreenStrip,
    KerbSeparation,
    ParkingLane,
    None,
}

impl fmt::Display for SafetyStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyStrip::GreenStrip => write!(f, "green_strip"),
            SafetyStrip::KerbSeparation => write!(f, "kerb_separation"),
            SafetyStrip::ParkingLane => write!(f, "parking_lane"),
            SafetyStrip::None => write!(f, "none"),
        }
    }
}

impl FromStr for SafetyStrip {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green_strip" => Ok(SafetyStrip::GreenStrip),
            "kerb_separation" => Ok(SafetyStrip::KerbSeparation),
            "parking_lane" => Ok(SafetyStrip::ParkingLane),
            "none" => Ok(SafetyStrip::None),
            _ => Err(()),
        }
    }
}

/// Which carriageway side a path runs on, relative to edge stationing.
///
/// Direction-valued: when a fragment's source geometry runs opposite the
/// edge, left and right swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarriagewaySide {
    Left,
    Right,
    Both,
}

impl CarriagewaySide {
    /// The value as seen from the opposite stationing direction.
    pub fn inverted(self) -> Self {
        match self {
            CarriagewaySide::Left => CarriagewaySide::Right,
            CarriagewaySide::Right => CarriagewaySide::Left,
            CarriagewaySide::Both => CarriagewaySide::Both,
        }
    }
}

impl fmt::Display for CarriagewaySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarriagewaySide::Left => write!(f, "left"),
            CarriagewaySide::Right => write!(f, "right"),
            CarriagewaySide::Both => write!(f, "both"),
        }
    }
}

impl FromStr for CarriagewaySide {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(CarriagewaySide::Left),
            "right" => Ok(CarriagewaySide::Right),
            "both" => Ok(CarriagewaySide::Both),
            _ => Err(()),
        }
    }
}

/// A typed, validated attribute value as stored in edge segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Surface(Surface),
    PathType(PathType),
    SafetyStrip(SafetyStrip),
    /// Usable width in metres.
    Width(f64),
    CarriagewaySide(CarriagewaySide),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Surface(v) => write!(f, "{}", v),
            AttributeValue::PathType(v) => write!(f, "{}", v),
            AttributeValue::SafetyStrip(v) => write!(f, "{}", v),
            AttributeValue::Width(v) => write!(f, "{}", v),
            AttributeValue::CarriagewaySide(v) => write!(f, "{}", v),
        }
    }
}

/// Outcome of normalizing a raw value through a format adapter.
///
/// `Missing` drops the fragment without touching existing segments, the
/// no-null-overwrite rule. `Invalid` is recorded as a conflict and likewise
/// never written.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    /// The raw value was empty or a format-specific "no data" marker.
    Missing,
    /// The raw value is not part of the attribute's vocabulary.
    Invalid { raw: String },
    /// A valid canonical value.
    Value(AttributeValue),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_from_str() {
        let surfaces = [
            Surface::Asphalt,
            Surface::Concrete,
            Surface::GravelBound,
            Surface::Sett,
            Surface::Unbound,
        ];
        for s in surfaces {
            assert_eq!(s.to_string().parse::<Surface>(), Ok(s));
        }
        assert_eq!(
            "separated_path".parse::<PathType>(),
            Ok(PathType::SeparatedPath)
        );
        assert_eq!(
            "kerb_separation".parse::<SafetyStrip>(),
            Ok(SafetyStrip::KerbSeparation)
        );
        assert!("cobblestone".parse::<Surface>().is_err());
    }

    #[test]
    fn test_carriageway_side_inversion() {
        assert_eq!(CarriagewaySide::Left.inverted(), CarriagewaySide::Right);
        assert_eq!(CarriagewaySide::Right.inverted(), CarriagewaySide::Left);
        assert_eq!(CarriagewaySide::Both.inverted(), CarriagewaySide::Both);
    }

    #[test]
    fn test_attribute_value_display() {
        assert_eq!(
            AttributeValue::Surface(Surface::GravelBound).to_string(),
            "gravel_bound"
        );
        assert_eq!(AttributeValue::Width(2.5).to_string(), "2.5");
    }
}
