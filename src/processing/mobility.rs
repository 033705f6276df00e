//! Tracking a moving node from noisy range readings
//!
//! Every anchor reports a range to the target on every frame; the frame
//! estimate is the distance-vector Min-Max centroid. Playback of the frames
//! is left to the presentation layer.

use std::f64::consts::PI;

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::algorithms::geometry::distance;
use crate::algorithms::minmax::estimate_from_distances;
use crate::core::{Estimate, Point, MOBILITY_AMPLITUDE_M, MOBILITY_EDGE_MARGIN_M};
use crate::processing::sampler::check_area;
use crate::validation::error::{LocalizationError, LocalizationResult};

/// Ordered target positions, one per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobilityPath {
    pub waypoints: Vec<Point>,
}

/// Target and estimate for one frame of the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackFrame {
    pub target: Point,
    pub estimate: Estimate,
    pub error: Option<f64>,
}

/// `count` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| start + step * i as f64)
}

impl MobilityPath {
    pub fn new(waypoints: Vec<Point>) -> Self {
        Self { waypoints }
    }

    /// Left-to-right sweep across the area, oscillating around mid-height
    /// through two full sine periods
    pub fn sinusoidal(area_width: f64, area_height: f64, frames: usize) -> LocalizationResult<Self> {
        check_area(area_width, area_height)?;

        let xs = linspace(MOBILITY_EDGE_MARGIN_M, area_width - MOBILITY_EDGE_MARGIN_M, frames);
        let phases = linspace(0.0, 4.0 * PI, frames);
        let mid = area_height / 2.0;

        let waypoints = xs
            .zip(phases)
            .map(|(x, t)| Point::new(x, mid + MOBILITY_AMPLITUDE_M * t.sin()))
            .collect();

        Ok(Self { waypoints })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// True ranges from every anchor to `target`, perturbed by Gaussian noise.
///
/// A range reading cannot be negative, so noisy readings are floored at zero.
pub fn noisy_ranges<R: Rng>(
    anchors: &[Point],
    target: &Point,
    noise: &Normal<f64>,
    rng: &mut R,
) -> Vec<f64> {
    anchors
        .iter()
        .map(|anchor| (distance(anchor, target) + noise.sample(rng)).max(0.0))
        .collect()
}

/// Estimate the target position on every frame of `path`
pub fn track_target<R: Rng>(
    anchors: &[Point],
    path: &MobilityPath,
    noise_stddev: f64,
    rng: &mut R,
) -> LocalizationResult<Vec<TrackFrame>> {
    let noise = Normal::new(0.0, noise_stddev).map_err(|e| {
        LocalizationError::invalid_input("noise_stddev", noise_stddev, &e.to_string())
    })?;
    if !noise_stddev.is_finite() {
        return Err(LocalizationError::invalid_input(
            "noise_stddev",
            noise_stddev,
            "noise standard deviation must be finite",
        ));
    }

    let mut frames = Vec::with_capacity(path.len());
    for target in &path.waypoints {
        let ranges = noisy_ranges(anchors, target, &noise, rng);
        let estimate = estimate_from_distances(anchors, &ranges)?;
        frames.push(TrackFrame {
            target: *target,
            estimate,
            error: estimate.map(|est| distance(target, &est)),
        });
    }

    debug!(
        "tracked {} frames against {} anchors (noise sigma {:.2} m)",
        frames.len(),
        anchors.len(),
        noise_stddev
    );

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_MOBILITY_FRAMES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sinusoidal_path_shape() {
        let path = MobilityPath::sinusoidal(100.0, 100.0, DEFAULT_MOBILITY_FRAMES).unwrap();

        assert_eq!(path.len(), 80);
        let first = path.waypoints[0];
        let last = path.waypoints[79];
        assert!((first.x - 10.0).abs() < 1e-10);
        assert!((first.y - 50.0).abs() < 1e-10);
        assert!((last.x - 90.0).abs() < 1e-10);
        // sin(4π) is zero up to rounding
        assert!((last.y - 50.0).abs() < 1e-9);
        for p in &path.waypoints {
            assert!(p.y >= 35.0 - 1e-10 && p.y <= 65.0 + 1e-10);
        }
    }

    #[test]
    fn test_single_frame_path() {
        let path = MobilityPath::sinusoidal(100.0, 60.0, 1).unwrap();
        assert_eq!(path.waypoints, vec![Point::new(10.0, 30.0)]);
        assert!(MobilityPath::sinusoidal(100.0, 60.0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_sinusoidal_rejects_bad_area() {
        assert!(MobilityPath::sinusoidal(0.0, 100.0, 10).is_err());
    }

    #[test]
    fn test_noiseless_track_matches_distance_vector_estimate() {
        let anchors = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let path = MobilityPath::new(vec![Point::new(5.0, 0.0)]);
        let mut rng = StdRng::seed_from_u64(4);

        let frames = track_target(&anchors, &path, 0.0, &mut rng).unwrap();

        assert_eq!(frames.len(), 1);
        let estimate = frames[0].estimate.unwrap();
        assert!((estimate.x - 5.0).abs() < 1e-10);
        assert!(estimate.y.abs() < 1e-10);
        assert!(frames[0].error.unwrap() < 1e-10);
    }

    #[test]
    fn test_noisy_track_is_reproducible() {
        let anchors = vec![
            Point::new(10.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(50.0, 90.0),
        ];
        let path = MobilityPath::sinusoidal(100.0, 100.0, 20).unwrap();

        let a = track_target(&anchors, &path, 1.0, &mut StdRng::seed_from_u64(8)).unwrap();
        let b = track_target(&anchors, &path, 1.0, &mut StdRng::seed_from_u64(8)).unwrap();

        assert_eq!(a, b);
        assert!(a.iter().all(|f| f.estimate.is_some() && f.error.unwrap() >= 0.0));
    }

    #[test]
    fn test_noisy_ranges_are_non_negative() {
        let anchors = vec![Point::new(1.0, 1.0); 50];
        let noise = Normal::new(0.0, 5.0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let ranges = noisy_ranges(&anchors, &Point::new(1.0, 1.0), &noise, &mut rng);
        assert!(ranges.iter().all(|r| *r >= 0.0));
    }

    #[test]
    fn test_track_without_anchors() {
        let path = MobilityPath::new(vec![Point::new(1.0, 1.0)]);
        let frames = track_target(&[], &path, 1.0, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(frames[0].estimate, None);
        assert_eq!(frames[0].error, None);
    }

    #[test]
    fn test_negative_noise_rejected() {
        let path = MobilityPath::new(vec![Point::new(1.0, 1.0)]);
        let result = track_target(&[Point::new(0.0, 0.0)], &path, -1.0, &mut StdRng::seed_from_u64(0));
        assert!(result.is_err());
    }
}
