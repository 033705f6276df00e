//! Node placement for simulation trials

use rand::Rng;

use crate::core::{AnchorSet, Point, UnknownSet};
use crate::validation::error::{LocalizationError, LocalizationResult};

/// Source of anchor and unknown-node layouts.
///
/// The random source is passed in so trials are reproducible from a seed.
pub trait NodeSampler {
    fn sample<R: Rng>(
        &self,
        area_width: f64,
        area_height: f64,
        anchor_count: usize,
        unknown_count: usize,
        rng: &mut R,
    ) -> LocalizationResult<(AnchorSet, UnknownSet)>;
}

/// Independent uniform placement over `[0, width) × [0, height)`
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSampler;

impl UniformSampler {
    pub fn new() -> Self {
        Self
    }

    fn sample_points<R: Rng>(count: usize, width: f64, height: f64, rng: &mut R) -> Vec<Point> {
        (0..count)
            .map(|_| Point::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height))
            .collect()
    }
}

impl NodeSampler for UniformSampler {
    fn sample<R: Rng>(
        &self,
        area_width: f64,
        area_height: f64,
        anchor_count: usize,
        unknown_count: usize,
        rng: &mut R,
    ) -> LocalizationResult<(AnchorSet, UnknownSet)> {
        check_area(area_width, area_height)?;

        let anchors = Self::sample_points(anchor_count, area_width, area_height, rng);
        let unknowns = Self::sample_points(unknown_count, area_width, area_height, rng);
        Ok((anchors, unknowns))
    }
}

/// Reject degenerate deployment areas before any sampling happens
pub fn check_area(area_width: f64, area_height: f64) -> LocalizationResult<()> {
    for (parameter, value) in [("area_width", area_width), ("area_height", area_height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(LocalizationError::invalid_input(
                parameter,
                value,
                "area dimensions must be positive and finite",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_sampler_counts_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let (anchors, unknowns) = UniformSampler::new()
            .sample(120.0, 30.0, 15, 40, &mut rng)
            .unwrap();

        assert_eq!(anchors.len(), 15);
        assert_eq!(unknowns.len(), 40);
        for p in anchors.iter().chain(unknowns.iter()) {
            assert!(p.x >= 0.0 && p.x < 120.0);
            assert!(p.y >= 0.0 && p.y < 30.0);
        }
    }

    #[test]
    fn test_uniform_sampler_is_reproducible() {
        let sampler = UniformSampler::new();
        let first = sampler
            .sample(100.0, 100.0, 5, 5, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let second = sampler
            .sample(100.0, 100.0, 5, 5, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_counts_allowed() {
        let mut rng = StdRng::seed_from_u64(1);
        let (anchors, unknowns) = UniformSampler::new()
            .sample(10.0, 10.0, 0, 0, &mut rng)
            .unwrap();
        assert!(anchors.is_empty());
        assert!(unknowns.is_empty());
    }

    #[test]
    fn test_invalid_area_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampler = UniformSampler::new();
        assert!(sampler.sample(0.0, 10.0, 3, 3, &mut rng).is_err());
        assert!(sampler.sample(10.0, -10.0, 3, 3, &mut rng).is_err());
        assert!(sampler.sample(f64::NAN, 10.0, 3, 3, &mut rng).is_err());
    }
}
