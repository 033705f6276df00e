use serde::{Deserialize, Serialize};

/// Summary of localization errors over the defined samples of a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorStatistics {
    /// Mean localization error (meters)
    pub mean_error: f64,
    /// Standard deviation of localization error (meters)
    pub std_dev_error: f64,
    /// Root Mean Square Error (meters)
    pub rmse: f64,
    /// 95th percentile error (meters)
    pub error_95_percentile: f64,
    /// Maximum observed error (meters)
    pub max_error: f64,
    /// Minimum observed error (meters)
    pub min_error: f64,
    /// Number of nodes with a defined error
    pub localized_count: usize,
    /// Number of nodes left without an estimate
    pub unlocalized_count: usize,
}

/// Arithmetic mean of the defined entries, `None` when there are none
pub fn mean_defined(errors: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = errors
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), e| (sum + e, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

impl ErrorStatistics {
    /// Statistics over the defined entries, `None` if every entry is undefined
    pub fn from_errors(errors: &[Option<f64>]) -> Option<Self> {
        let mut defined: Vec<f64> = errors.iter().flatten().copied().collect();
        let unlocalized_count = errors.len() - defined.len();
        let mut stats = Self::from_samples(&mut defined)?;
        stats.unlocalized_count = unlocalized_count;
        Some(stats)
    }

    /// Statistics over plain error samples, `None` for an empty pool
    pub fn from_samples(samples: &mut [f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len();
        let mean_error = samples.iter().sum::<f64>() / n as f64;

        let rmse = (samples.iter().map(|e| e.powi(2)).sum::<f64>() / n as f64).sqrt();

        let variance = samples
            .iter()
            .map(|e| (e - mean_error).powi(2))
            .sum::<f64>()
            / n as f64;

        samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let index_95 = ((n as f64 * 0.95).ceil() as usize).saturating_sub(1);

        Some(Self {
            mean_error,
            std_dev_error: variance.sqrt(),
            rmse,
            error_95_percentile: samples[index_95.min(n - 1)],
            max_error: samples[n - 1],
            min_error: samples[0],
            localized_count: n,
            unlocalized_count: 0,
        })
    }

    /// Fraction of nodes that received an estimate
    pub fn coverage(&self) -> f64 {
        let total = self.localized_count + self.unlocalized_count;
        self.localized_count as f64 / total as f64
    }
}
