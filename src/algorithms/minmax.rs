//! Min-Max (bounding box) position estimation
//!
//! Two entry points share the same reduction: the centroid of an
//! axis-aligned box built from anchor positions.
//!
//! - Range-filtered: anchors within the communication range of the node are
//!   kept and the box spans their positions. No anchor in range gives `None`.
//! - Distance-vector: every anchor contributes the square
//!   `[x - d, x + d] × [y - d, y + d]` and the box spans all of them.

use log::trace;

use crate::algorithms::geometry::{distance, BoundingBox};
use crate::core::{Estimate, Point};
use crate::validation::error::{LocalizationError, LocalizationResult};

/// Range-filtered Min-Max estimator for a fixed communication range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxEstimator {
    comm_range: f64,
}

impl MinMaxEstimator {
    /// Create an estimator, rejecting negative or non-finite ranges
    pub fn new(comm_range: f64) -> LocalizationResult<Self> {
        if !comm_range.is_finite() || comm_range < 0.0 {
            return Err(LocalizationError::invalid_input(
                "comm_range",
                comm_range,
                "communication range must be a non-negative finite distance",
            ));
        }
        Ok(Self { comm_range })
    }

    pub fn comm_range(&self) -> f64 {
        self.comm_range
    }

    /// Anchors within communication range of `node`, in input order
    pub fn in_range_anchors(&self, anchors: &[Point], node: &Point) -> Vec<Point> {
        anchors
            .iter()
            .filter(|anchor| distance(anchor, node) <= self.comm_range)
            .copied()
            .collect()
    }

    /// Bounding box of the in-range anchors, `None` if there are none
    pub fn bounding_box(&self, anchors: &[Point], node: &Point) -> Option<BoundingBox> {
        BoundingBox::enclosing(&self.in_range_anchors(anchors, node))
    }

    /// Centroid of the in-range bounding box
    pub fn estimate(&self, anchors: &[Point], node: &Point) -> Estimate {
        let bbox = self.bounding_box(anchors, node);
        if bbox.is_none() {
            trace!(
                "no anchor within {:.2} m of ({:.2}, {:.2})",
                self.comm_range, node.x, node.y
            );
        }
        bbox.map(|b| b.center())
    }
}

/// Range-filtered estimate for a single node
pub fn estimate_in_range(
    anchors: &[Point],
    node: &Point,
    comm_range: f64,
) -> LocalizationResult<Estimate> {
    Ok(MinMaxEstimator::new(comm_range)?.estimate(anchors, node))
}

/// Estimate from one range reading per anchor.
///
/// No range filtering is applied; the caller supplies only usable anchors.
/// An empty anchor set yields `None`.
pub fn estimate_from_distances(
    anchors: &[Point],
    distances: &[f64],
) -> LocalizationResult<Estimate> {
    if anchors.len() != distances.len() {
        return Err(LocalizationError::invalid_input(
            "distances",
            format!("length {}", distances.len()),
            &format!("expected one reading per anchor ({} anchors)", anchors.len()),
        ));
    }

    if let Some((index, d)) = distances
        .iter()
        .enumerate()
        .find(|(_, d)| !d.is_finite() || **d < 0.0)
    {
        return Err(LocalizationError::invalid_input(
            &format!("distances[{}]", index),
            d,
            "range readings must be non-negative and finite",
        ));
    }

    let bbox = anchors
        .iter()
        .zip(distances)
        .map(|(anchor, &d)| BoundingBox {
            min_x: anchor.x - d,
            max_x: anchor.x + d,
            min_y: anchor.y - d,
            max_y: anchor.y + d,
        })
        .reduce(|acc, b| acc.union(&b));

    Ok(bbox.map(|b| b.center()))
}
