//! Side-of-way resolution configuration.

use super::defaults::{
    DEFAULT_ON_LINE_THRESHOLD_M, DEFAULT_PARALLEL_ANGLE_DEG, DEFAULT_PARALLEL_BUFFER_M,
    DEFAULT_SIDE_SAMPLE_COUNT, DEFAULT_VOTE_DOMINANCE,
};

/// Configuration for geometric side-of-way resolution.
///
/// Groups the sampling and voting parameters of the side resolver together
/// with the search parameters of the parallel-edge adjacency fallback.
///
/// # Example
///
/// ```
/// use wayfuse::config::SideConfig;
///
/// // Using defaults
/// let config = SideConfig::default();
/// assert_eq!(config.sample_count(), 9);
/// assert_eq!(config.vote_dominance(), 0.8);
///
/// // Custom configuration
/// let config = SideConfig::new()
///     .with_sample_count(15)
///     .with_parallel_buffer_m(25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideConfig {
    /// Number of points sampled along the feature line.
    sample_count: usize,
    /// Offset below which a sample votes "on-line", in metres.
    on_line_threshold_m: f64,
    /// Share of off-line votes one side needs to win.
    vote_dominance: f64,
    /// Search buffer for parallel neighbour edges, in metres.
    parallel_buffer_m: f64,
    /// Maximum mean-direction angle for edges to count as parallel, in degrees.
    parallel_angle_deg: f64,
}

impl SideConfig {
    /// Create a new side configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of points sampled along the feature line.
    ///
    /// Values below 2 are raised to 2 so both endpoints always vote.
    /// Default: 9 samples.
    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = count.max(2);
        self
    }

    /// Set the offset below which a sample counts as lying on the edge.
    ///
    /// Default: 0.5 metres.
    pub fn with_on_line_threshold_m(mut self, threshold: f64) -> Self {
        self.on_line_threshold_m = threshold;
        self
    }

    /// Set the share of off-line votes one side needs to win the vote.
    ///
    /// Default: 0.8.
    pub fn with_vote_dominance(mut self, dominance: f64) -> Self {
        self.vote_dominance = dominance;
        self
    }

    /// Set the search buffer for parallel neighbour edges.
    ///
    /// Default: 15 metres.
    pub fn with_parallel_buffer_m(mut self, buffer: f64) -> Self {
        self.parallel_buffer_m = buffer;
        self
    }

    /// Set the maximum angle between mean directions for two edges to count
    /// as parallel.
    ///
    /// Default: 25 degrees.
    pub fn with_parallel_angle_deg(mut self, angle: f64) -> Self {
        self.parallel_angle_deg = angle;
        self
    }

    /// Get the sample count.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Get the on-line threshold in metres.
    pub fn on_line_threshold_m(&self) -> f64 {
        self.on_line_threshold_m
    }

    /// Get the vote dominance share.
    pub fn vote_dominance(&self) -> f64 {
        self.vote_dominance
    }

    /// Get the parallel search buffer in metres.
    pub fn parallel_buffer_m(&self) -> f64 {
        self.parallel_buffer_m
    }

    /// Get the parallel angle limit in degrees.
    pub fn parallel_angle_deg(&self) -> f64 {
        self.parallel_angle_deg
    }
}

impl Default for SideConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SIDE_SAMPLE_COUNT,
            on_line_threshold_m: DEFAULT_ON_LINE_THRESHOLD_M,
            vote_dominance: DEFAULT_VOTE_DOMINANCE,
            parallel_buffer_m: DEFAULT_PARALLEL_BUFFER_M,
            parallel_angle_deg: DEFAULT_PARALLEL_ANGLE_DEG,
        }
    }
}
