//! Adapter factory for centralized format selection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::adapter::FormatAdapter;
use super::agency::AgencyFormat;
use super::internal::InternalFormat;

/// Identifies a supported delivery format.
///
/// Selected once per import session; new formats are added as new variants
/// without callers ever touching concrete adapter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// Road agency shapefile delivery (DBF column names, numeric code
    /// tables).
    Agency,
    /// The application's own export format (canonical keys and values,
    /// optional explicit side tags).
    Internal,
}

impl FormatTag {
    /// Returns the adapter name this tag selects.
    pub fn name(&self) -> &str {
        match self {
            Self::Agency => "agency-shapefile",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raised when a format name does not identify a known adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown delivery format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for FormatTag {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agency" | "agency-shapefile" => Ok(FormatTag::Agency),
            "internal" => Ok(FormatTag::Internal),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Create the adapter for a format tag.
pub fn create_adapter(tag: FormatTag) -> Arc<dyn FormatAdapter> {
    match tag {
        FormatTag::Agency => Arc::new(AgencyFormat::new()),
        FormatTag::Internal => Arc::new(InternalFormat::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parses_from_name() {
        assert_eq!("agency".parse::<FormatTag>().unwrap(), FormatTag::Agency);
        assert_eq!(
            " Internal ".parse::<FormatTag>().unwrap(),
            FormatTag::Internal
        );
        assert!("csv".parse::<FormatTag>().is_err());
    }

    #[test]
    fn test_factory_returns_matching_adapter() {
        for tag in [FormatTag::Agency, FormatTag::Internal] {
            let adapter = create_adapter(tag);
            assert_eq!(adapter.name(), tag.name());
        }
    }
}
