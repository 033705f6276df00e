//! Error types and error statistics

pub mod error;
pub mod statistics;

pub use error::{LocalizationError, LocalizationResult};
pub use statistics::{mean_defined, ErrorStatistics};
