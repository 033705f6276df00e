//! Node sampling, batched localization and trial aggregation

pub mod sampler;
pub mod simulation;
pub mod trials;
pub mod mobility;

pub use sampler::{NodeSampler, UniformSampler};
pub use simulation::{simulate_localization, LocalizationRun};
pub use trials::{average_error, performance_sweep, PerformancePoint, TrialAggregator};
pub use mobility::{track_target, MobilityPath, TrackFrame};
