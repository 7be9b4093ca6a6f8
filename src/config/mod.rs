//! Configuration types for the conflation engine.
//!
//! This module provides structured configuration objects that group related
//! parameters together. The engine is embedded as a library, so there is no
//! config-file layer; the host application builds these values and hands them
//! to the session.
//!
//! # Example
//!
//! ```
//! use wayfuse::config::{ConflationConfig, SideConfig, ToleranceConfig};
//!
//! // Using defaults
//! let config = ConflationConfig::default();
//! assert_eq!(config.tolerance().snap_eps(), 0.004);
//!
//! // Custom configuration
//! let config = ConflationConfig::new()
//!     .with_tolerance(ToleranceConfig::new().with_snap_eps(0.005))
//!     .with_side(SideConfig::new().with_sample_count(15));
//! ```

mod defaults;
mod side;
mod tolerance;

pub use side::SideConfig;
pub use tolerance::ToleranceConfig;

/// Top-level configuration for a conflation run.
///
/// Aggregates the per-concern configs so a session is constructed from one
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConflationConfig {
    tolerance: ToleranceConfig,
    side: SideConfig,
}

impl ConflationConfig {
    /// Create a new conflation configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tolerance configuration.
    pub fn with_tolerance(mut self, tolerance: ToleranceConfig) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the side-resolution configuration.
    pub fn with_side(mut self, side: SideConfig) -> Self {
        self.side = side;
        self
    }

    /// Get the tolerance configuration.
    pub fn tolerance(&self) -> ToleranceConfig {
        self.tolerance
    }

    /// Get the side-resolution configuration.
    pub fn side(&self) -> SideConfig {
        self.side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aggregates_defaults() {
        let config = ConflationConfig::default();
        assert_eq!(config.tolerance(), ToleranceConfig::default());
        assert_eq!(config.side(), SideConfig::default());
    }

    #[test]
    fn test_builder_replaces_parts() {
        let config = ConflationConfig::new()
            .with_tolerance(ToleranceConfig::new().with_snap_eps(0.005))
            .with_side(SideConfig::new().with_sample_count(3));
        assert_eq!(config.tolerance().snap_eps(), 0.005);
        assert_eq!(config.side().sample_count(), 3);
    }
}
