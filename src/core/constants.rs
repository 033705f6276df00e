//! Reference simulation parameters

/// Default communication range (m)
pub const DEFAULT_COMM_RANGE_M: f64 = 50.0;

/// Default standard deviation of ranging noise on the mobility path (m)
pub const DEFAULT_NOISE_STDDEV_M: f64 = 1.0;

/// Default number of Monte-Carlo trials averaged by `average_error`
pub const DEFAULT_TRIAL_COUNT: usize = 25;

/// Communication range multipliers swept by the performance evaluation
pub const REFERENCE_RANGE_MULTIPLIERS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Number of frames along the mobility trajectory
pub const DEFAULT_MOBILITY_FRAMES: usize = 80;

/// Horizontal inset of the mobility trajectory from the area edges (m)
pub const MOBILITY_EDGE_MARGIN_M: f64 = 10.0;

/// Vertical amplitude of the sinusoidal mobility trajectory (m)
pub const MOBILITY_AMPLITUDE_M: f64 = 15.0;
