//! Run-level counters summarizing an import.

use std::fmt;

/// Counters accumulated over one import run.
///
/// The run hands these back inside its outcome so callers can log one
/// summary line or assert on throughput in tests. All fields are plain
/// totals; nothing here is updated concurrently.
///
/// # Example
///
/// ```
/// use wayfuse::session::RunStats;
///
/// let stats = RunStats {
///     features_total: 12,
///     features_unmatched: 2,
///     ..RunStats::default()
/// };
/// assert!(stats.to_string().contains("12 features"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Features handed to the run.
    pub features_total: usize,
    /// Features the matcher found no counterpart for.
    pub features_unmatched: usize,
    /// Edge projections produced across all matched features.
    pub projections: usize,
    /// Normalized fragments queued for merging.
    pub fragments: usize,
    /// Edges that received at least one fragment.
    pub edges_touched: usize,
    /// Conflicts recorded across all touched edges.
    pub conflicts: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} features ({} unmatched), {} projections, {} fragments, {} edges touched, {} conflicts",
            self.features_total,
            self.features_unmatched,
            self.projections,
            self.fragments,
            self.edges_touched,
            self.conflicts
        )
    }
}
