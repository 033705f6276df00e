//! Range-Free Localization
//!
//! Min-Max position estimation for wireless sensor networks: unknown nodes
//! are placed at the centroid of the bounding box of the anchors they can
//! hear, and the localization error is evaluated over Monte-Carlo trials.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{AnchorSet, Estimate, Point, UnknownSet};
pub use algorithms::{distance, estimate_from_distances, estimate_in_range, BoundingBox, MinMaxEstimator};
pub use processing::{
    average_error, performance_sweep, simulate_localization, track_target, LocalizationRun,
    MobilityPath, NodeSampler, PerformancePoint, TrackFrame, TrialAggregator, UniformSampler,
};
pub use validation::{ErrorStatistics, LocalizationError, LocalizationResult};
pub use utils::{ConfigError, ConfigurationManager, SimulationConfig};
pub use api::{CsvFormatter, JsonFormatter, OutputFormat, SimulationReport, TextFormatter};
