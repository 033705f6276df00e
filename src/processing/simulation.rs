//! Batched Min-Max localization of every unknown node in a layout

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::geometry::distance;
use crate::algorithms::minmax::MinMaxEstimator;
use crate::core::{AnchorSet, Estimate, UnknownSet};
use crate::processing::sampler::NodeSampler;
use crate::utils::config::SimulationConfig;
use crate::validation::error::LocalizationResult;
use crate::validation::statistics::{mean_defined, ErrorStatistics};

/// Outcome of localizing one sampled layout.
///
/// `estimates` and `errors` are index-aligned with `unknowns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizationRun {
    pub anchors: AnchorSet,
    pub unknowns: UnknownSet,
    pub estimates: Vec<Estimate>,
    pub errors: Vec<Option<f64>>,
    pub comm_range: f64,
}

impl LocalizationRun {
    /// Mean error over the localized nodes, `None` if none was localized
    pub fn mean_error(&self) -> Option<f64> {
        mean_defined(&self.errors)
    }

    /// Number of unknown nodes that received an estimate
    pub fn localized_count(&self) -> usize {
        self.estimates.iter().filter(|e| e.is_some()).count()
    }

    pub fn statistics(&self) -> Option<ErrorStatistics> {
        ErrorStatistics::from_errors(&self.errors)
    }

    /// Defined errors in node order
    pub fn defined_errors(&self) -> impl Iterator<Item = f64> + '_ {
        self.errors.iter().flatten().copied()
    }
}

/// Localize every unknown node against the anchor set
pub fn simulate_localization(
    anchors: AnchorSet,
    unknowns: UnknownSet,
    comm_range: f64,
) -> LocalizationResult<LocalizationRun> {
    let estimator = MinMaxEstimator::new(comm_range)?;
    Ok(run_with_estimator(&estimator, anchors, unknowns))
}

fn run_with_estimator(
    estimator: &MinMaxEstimator,
    anchors: AnchorSet,
    unknowns: UnknownSet,
) -> LocalizationRun {
    let comm_range = estimator.comm_range();
    let mut estimates = Vec::with_capacity(unknowns.len());
    let mut errors = Vec::with_capacity(unknowns.len());

    for unknown in &unknowns {
        let estimate = estimator.estimate(&anchors, unknown);
        errors.push(estimate.map(|est| distance(unknown, &est)));
        estimates.push(estimate);
    }

    let run = LocalizationRun {
        anchors,
        unknowns,
        estimates,
        errors,
        comm_range,
    };

    debug!(
        "localized {}/{} nodes at range {:.2} m",
        run.localized_count(),
        run.unknowns.len(),
        comm_range
    );

    run
}

/// Sample a fresh layout and localize it at `comm_range`.
///
/// The configuration and the range are checked before the sampler draws
/// anything from `rng`.
pub fn sample_and_simulate<S: NodeSampler, R: Rng>(
    config: &SimulationConfig,
    comm_range: f64,
    sampler: &S,
    rng: &mut R,
) -> LocalizationResult<LocalizationRun> {
    let estimator = MinMaxEstimator::new(comm_range)?;
    config.validate()?;
    sample_with_estimator(config, &estimator, sampler, rng)
}

/// Sample and localize with an already validated estimator
pub(crate) fn sample_with_estimator<S: NodeSampler, R: Rng>(
    config: &SimulationConfig,
    estimator: &MinMaxEstimator,
    sampler: &S,
    rng: &mut R,
) -> LocalizationResult<LocalizationRun> {
    let (anchors, unknowns) = sampler.sample(
        config.area_width,
        config.area_height,
        config.anchor_count,
        config.unknown_count,
        rng,
    )?;
    Ok(run_with_estimator(estimator, anchors, unknowns))
}
