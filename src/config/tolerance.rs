//! Fractional tolerance configuration.

use super::defaults::{clamp_snap_eps, DEFAULT_SNAP_EPS};

/// Configuration for range snapping and normalization.
///
/// The snap tolerance is the width, in fractional edge units, below which two
/// positions are treated as the same boundary. It controls sliver suppression
/// in segment sequences and degenerate-range rejection in the projector.
///
/// # Example
///
/// ```
/// use wayfuse::config::ToleranceConfig;
///
/// // Using defaults
/// let config = ToleranceConfig::default();
/// assert_eq!(config.snap_eps(), 0.004);
///
/// // Custom configuration
/// let config = ToleranceConfig::new().with_snap_eps(0.005);
/// assert_eq!(config.snap_eps(), 0.005);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceConfig {
    /// Snap tolerance in fractional edge units.
    snap_eps: f64,
}

impl ToleranceConfig {
    /// Create a new tolerance configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snap tolerance in fractional edge units.
    ///
    /// Values outside the supported band are clamped to it with a warning.
    /// Default: 0.004.
    pub fn with_snap_eps(mut self, eps: f64) -> Self {
        self.snap_eps = clamp_snap_eps(eps);
        self
    }

    /// Get the snap tolerance in fractional edge units.
    pub fn snap_eps(&self) -> f64 {
        self.snap_eps
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            snap_eps: DEFAULT_SNAP_EPS,
        }
    }
}
