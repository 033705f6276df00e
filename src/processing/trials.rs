//! Monte-Carlo aggregation of localization error
//!
//! `average_error` pools the defined errors of many independent trials at a
//! fixed range. `performance_sweep` runs exactly one trial per scaled range,
//! so its curve is noisier than the pooled average.

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::minmax::MinMaxEstimator;
use crate::processing::sampler::NodeSampler;
use crate::processing::simulation::sample_with_estimator;
use crate::utils::config::SimulationConfig;
use crate::validation::error::{LocalizationError, LocalizationResult};
use crate::validation::statistics::{mean_defined, ErrorStatistics};

/// One point of the error-versus-range curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub comm_range: f64,
    pub mean_error: Option<f64>,
}

/// Runs trials against one sampler
pub struct TrialAggregator<S: NodeSampler> {
    sampler: S,
}

impl<S: NodeSampler> TrialAggregator<S> {
    pub fn new(sampler: S) -> Self {
        Self { sampler }
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Defined errors from `trials` independent runs at `config.comm_range`
    pub fn error_pool<R: Rng>(
        &self,
        config: &SimulationConfig,
        trials: usize,
        rng: &mut R,
    ) -> LocalizationResult<Vec<f64>> {
        config.validate()?;
        if trials < 1 {
            return Err(LocalizationError::invalid_input(
                "trials",
                trials,
                "at least one trial is required",
            ));
        }

        let estimator = MinMaxEstimator::new(config.comm_range)?;

        let mut pool = Vec::with_capacity(trials * config.unknown_count);
        for trial in 0..trials {
            let run = sample_with_estimator(config, &estimator, &self.sampler, rng)?;
            let before = pool.len();
            pool.extend(run.defined_errors());
            debug!(
                "trial {}/{}: {} of {} errors defined",
                trial + 1,
                trials,
                pool.len() - before,
                run.errors.len()
            );
        }
        Ok(pool)
    }

    /// Mean error pooled over `trials` runs, `None` if no node was ever localized
    pub fn average_error<R: Rng>(
        &self,
        config: &SimulationConfig,
        trials: usize,
        rng: &mut R,
    ) -> LocalizationResult<Option<f64>> {
        let pool = self.error_pool(config, trials, rng)?;
        if pool.is_empty() {
            warn!("no node localized in {} trials; average error undefined", trials);
            return Ok(None);
        }

        let mean = pool.iter().sum::<f64>() / pool.len() as f64;
        info!(
            "average error over {} trials ({} samples): {:.3} m",
            trials,
            pool.len(),
            mean
        );
        Ok(Some(mean))
    }

    /// Pooled error statistics over `trials` runs
    pub fn error_statistics<R: Rng>(
        &self,
        config: &SimulationConfig,
        trials: usize,
        rng: &mut R,
    ) -> LocalizationResult<Option<ErrorStatistics>> {
        let mut pool = self.error_pool(config, trials, rng)?;
        Ok(ErrorStatistics::from_samples(&mut pool))
    }

    /// Single-trial mean error at each `config.comm_range * multiplier`, in order.
    ///
    /// Every scaled range is checked before the first layout is sampled; a
    /// multiplier that is negative, non-finite or overflows the range is
    /// rejected by name.
    pub fn performance_sweep<R: Rng>(
        &self,
        config: &SimulationConfig,
        range_multipliers: &[f64],
        rng: &mut R,
    ) -> LocalizationResult<Vec<PerformancePoint>> {
        config.validate()?;
        let estimators = range_multipliers
            .iter()
            .map(|&multiplier| scaled_estimator(config.comm_range, multiplier))
            .collect::<LocalizationResult<Vec<_>>>()?;

        let mut curve = Vec::with_capacity(estimators.len());
        for estimator in &estimators {
            let comm_range = estimator.comm_range();
            let run = sample_with_estimator(config, estimator, &self.sampler, rng)?;
            let mean_error = mean_defined(&run.errors);
            debug!("sweep range {:.2} m: mean error {:?}", comm_range, mean_error);
            curve.push(PerformancePoint { comm_range, mean_error });
        }
        Ok(curve)
    }
}

fn scaled_estimator(comm_range: f64, multiplier: f64) -> LocalizationResult<MinMaxEstimator> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(LocalizationError::invalid_input(
            "range_multiplier",
            multiplier,
            "range multipliers must be non-negative and finite",
        ));
    }
    let scaled = comm_range * multiplier;
    if !scaled.is_finite() {
        return Err(LocalizationError::invalid_input(
            "range_multiplier",
            multiplier,
            &format!("scaled range {} m * {} is not finite", comm_range, multiplier),
        ));
    }
    MinMaxEstimator::new(scaled)
}

/// Mean error pooled over `trials` independent runs
pub fn average_error<S: NodeSampler, R: Rng>(
    config: &SimulationConfig,
    trials: usize,
    sampler: S,
    rng: &mut R,
) -> LocalizationResult<Option<f64>> {
    TrialAggregator::new(sampler).average_error(config, trials, rng)
}

/// Error-versus-range curve with one trial per multiplier
pub fn performance_sweep<S: NodeSampler, R: Rng>(
    config: &SimulationConfig,
    range_multipliers: &[f64],
    sampler: S,
    rng: &mut R,
) -> LocalizationResult<Vec<PerformancePoint>> {
    TrialAggregator::new(sampler).performance_sweep(config, range_multipliers, rng)
}
