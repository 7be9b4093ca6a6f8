//! Default values and constants for all engine settings.
//!
//! Contains all `DEFAULT_*` constants and the clamp helpers the config
//! builders use.

// =============================================================================
// Range snapping limits
// =============================================================================

/// Minimum snap tolerance in fractional edge units.
/// Below this, floating-point jitter in projected stations creates slivers.
pub const MIN_SNAP_EPS: f64 = 0.003;

/// Maximum snap tolerance in fractional edge units.
/// Above this, genuinely distinct segment boundaries get merged away.
pub const MAX_SNAP_EPS: f64 = 0.005;

/// Default snap tolerance in fractional edge units.
/// Centre of the supported band; on a 250 m edge this is one metre.
pub const DEFAULT_SNAP_EPS: f64 = 0.004;

/// Clamps the snap tolerance to the supported band and logs a warning if
/// clamped.
pub(super) fn clamp_snap_eps(value: f64) -> f64 {
    if value < MIN_SNAP_EPS {
        tracing::warn!(
            requested = value,
            min = MIN_SNAP_EPS,
            max = MAX_SNAP_EPS,
            "snap_eps below minimum, clamping to {}",
            MIN_SNAP_EPS
        );
        MIN_SNAP_EPS
    } else if value > MAX_SNAP_EPS {
        tracing::warn!(
            requested = value,
            min = MIN_SNAP_EPS,
            max = MAX_SNAP_EPS,
            "snap_eps above maximum, clamping to {}",
            MAX_SNAP_EPS
        );
        MAX_SNAP_EPS
    } else {
        value
    }
}

// =============================================================================
// Side resolution defaults
// =============================================================================

/// Default number of points sampled along a feature line for side voting.
pub const DEFAULT_SIDE_SAMPLE_COUNT: usize = 9;

/// Default offset below which a sample counts as lying on the edge, in metres.
pub const DEFAULT_ON_LINE_THRESHOLD_M: f64 = 0.5;

/// Default share of off-line votes one side needs to win the vote.
pub const DEFAULT_VOTE_DOMINANCE: f64 = 0.8;

// =============================================================================
// Adjacency fallback defaults
// =============================================================================

/// Default search buffer for parallel neighbour edges, in metres.
pub const DEFAULT_PARALLEL_BUFFER_M: f64 = 15.0;

/// Default maximum angle between mean directions for two edges to count as
/// parallel, in degrees.
pub const DEFAULT_PARALLEL_ANGLE_DEG: f64 = 25.0;
