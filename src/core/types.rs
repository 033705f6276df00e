//! Core data types for the localization system

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// 2D position in the local area frame (metres)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vector2(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Nodes with known positions, fixed for one run
pub type AnchorSet = Vec<Point>;

/// True positions of the nodes to be localized
pub type UnknownSet = Vec<Point>;

/// Estimated position, `None` when no anchor was in range
pub type Estimate = Option<Point>;
