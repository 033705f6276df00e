//! Core positioning algorithms

pub mod geometry;
pub mod minmax;

pub use geometry::{distance, BoundingBox};
pub use minmax::{estimate_from_distances, estimate_in_range, MinMaxEstimator};
