use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{DEFAULT_COMM_RANGE_M, DEFAULT_NOISE_STDDEV_M, DEFAULT_TRIAL_COUNT};

/// Simulation parameters for one localization study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Width of the deployment area (meters)
    pub area_width: f64,
    /// Height of the deployment area (meters)
    pub area_height: f64,
    /// Number of anchors sampled per trial
    pub anchor_count: usize,
    /// Number of unknown nodes sampled per trial
    pub unknown_count: usize,
    /// Communication range threshold (meters)
    pub comm_range: f64,
    /// Ranging noise standard deviation for the mobility track (meters)
    pub noise_stddev: f64,
    /// Number of independent trials averaged by `average_error`
    pub trial_count: usize,
    /// Seed for a reproducible random source; entropy when absent
    pub seed: Option<u64>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

/// Configuration validation result
#[derive(Debug)]
pub struct ValidationResult {
    /// Whether configuration is valid
    pub is_valid: bool,
    /// Validation errors
    pub errors: Vec<ConfigError>,
    /// Validation warnings
    pub warnings: Vec<String>,
}

/// Holds the active configuration and where it was loaded from
pub struct ConfigurationManager {
    config: SimulationConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            area_width: 100.0,
            area_height: 100.0,
            anchor_count: 10,
            unknown_count: 3,
            comm_range: DEFAULT_COMM_RANGE_M,
            noise_stddev: DEFAULT_NOISE_STDDEV_M,
            trial_count: DEFAULT_TRIAL_COUNT,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_area(mut self, width: f64, height: f64) -> Self {
        self.area_width = width;
        self.area_height = height;
        self
    }

    pub fn with_anchor_count(mut self, count: usize) -> Self {
        self.anchor_count = count;
        self
    }

    pub fn with_unknown_count(mut self, count: usize) -> Self {
        self.unknown_count = count;
        self
    }

    pub fn with_comm_range(mut self, comm_range: f64) -> Self {
        self.comm_range = comm_range;
        self
    }

    pub fn with_noise_stddev(mut self, noise_stddev: f64) -> Self {
        self.noise_stddev = noise_stddev;
        self
    }

    pub fn with_trial_count(mut self, trials: usize) -> Self {
        self.trial_count = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Full validation report for this configuration
    pub fn validation_report(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (parameter, value) in [("area_width", self.area_width), ("area_height", self.area_height)] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(invalid(parameter, value, "Area dimensions must be positive and finite"));
            }
        }

        if !self.comm_range.is_finite() || self.comm_range < 0.0 {
            errors.push(invalid(
                "comm_range",
                self.comm_range,
                "Communication range must be a non-negative finite distance",
            ));
        }

        if !self.noise_stddev.is_finite() || self.noise_stddev < 0.0 {
            errors.push(invalid(
                "noise_stddev",
                self.noise_stddev,
                "Noise standard deviation must be non-negative and finite",
            ));
        }

        if self.trial_count < 1 {
            errors.push(invalid("trial_count", self.trial_count, "At least one trial is required"));
        }

        if self.anchor_count == 0 {
            warnings.push("No anchors configured; every estimate will be undefined".to_string());
        }
        if self.unknown_count == 0 {
            warnings.push("No unknown nodes configured; error statistics will be undefined".to_string());
        }
        if self.comm_range == 0.0 {
            warnings.push("Zero communication range only matches anchors at the exact node position".to_string());
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Reject malformed configuration with the first error found
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.validation_report().errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl ConfigError {
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ConfigError::InvalidParameter { .. })
    }
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Set communication range, returning the previous value
    pub fn set_comm_range(&mut self, comm_range: f64) -> Result<f64, ConfigError> {
        let candidate = self.config.clone().with_comm_range(comm_range);
        candidate.validate()?;
        let old = self.config.comm_range;
        self.config = candidate;
        self.is_modified = true;
        Ok(old)
    }

    /// Set trial count, returning the previous value
    pub fn set_trial_count(&mut self, trials: usize) -> Result<usize, ConfigError> {
        let candidate = self.config.clone().with_trial_count(trials);
        candidate.validate()?;
        let old = self.config.trial_count;
        self.config = candidate;
        self.is_modified = true;
        Ok(old)
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: SimulationConfig = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            }
        })?;

        // Validate before applying
        config.validate()?;

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            }
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Path of the file the configuration was last loaded from or saved to
    pub fn config_file_path(&self) -> Option<&str> {
        self.config_file_path.as_deref()
    }

    /// Check if configuration has been modified since last save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => {
                write!(f, "I/O error: {}", message)
            }
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_simulation_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.comm_range, 50.0);
        assert_eq!(config.noise_stddev, 1.0);
        assert_eq!(config.trial_count, 25);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let config = SimulationConfig::new().with_area(-10.0, 100.0);
        match config.validate() {
            Err(ConfigError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, "area_width"),
            other => panic!("expected invalid area_width, got {:?}", other),
        }

        let config = SimulationConfig::new().with_area(100.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_range_noise_and_trials_rejected() {
        assert!(SimulationConfig::new().with_comm_range(-1.0).validate().is_err());
        assert!(SimulationConfig::new().with_comm_range(f64::NAN).validate().is_err());
        assert!(SimulationConfig::new().with_noise_stddev(-0.5).validate().is_err());
        assert!(SimulationConfig::new().with_trial_count(0).validate().is_err());
        assert!(SimulationConfig::new().with_comm_range(0.0).validate().is_ok());
    }

    #[test]
    fn test_validation_report_collects_all_errors() {
        let config = SimulationConfig::new()
            .with_area(0.0, -1.0)
            .with_trial_count(0)
            .with_anchor_count(0);
        let report = config.validation_report();

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_runtime_comm_range_adjustment() {
        let mut manager = ConfigurationManager::new();

        let old_range = manager.set_comm_range(75.0).unwrap();
        assert_eq!(old_range, 50.0);
        assert_eq!(manager.get_config().comm_range, 75.0);
        assert!(manager.is_modified());

        assert!(manager.set_comm_range(-5.0).is_err());
        assert_eq!(manager.get_config().comm_range, 75.0);

        assert!(manager.set_trial_count(0).is_err());
        assert_eq!(manager.set_trial_count(10).unwrap(), 25);
    }

    #[test]
    fn test_config_serialization() {
        let mut manager = ConfigurationManager::new();
        manager
            .update_config(SimulationConfig::new().with_anchor_count(12).with_seed(7))
            .unwrap();

        let temp_path = std::env::temp_dir().join("range_free_localization_test_config.json");
        manager.save_to_file(&temp_path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&temp_path).unwrap();
        assert_eq!(loaded.get_config().anchor_count, 12);
        assert_eq!(loaded.get_config().seed, Some(7));
        assert!(loaded.config_file_path().is_some());

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "area_width": 200.0, "anchor_count": 4 }"#).unwrap();
        assert_eq!(config.area_width, 200.0);
        assert_eq!(config.area_height, 100.0);
        assert_eq!(config.anchor_count, 4);
        assert_eq!(config.trial_count, 25);
    }

    #[test]
    fn test_invalid_file_contents_rejected() {
        let temp_path = std::env::temp_dir().join("range_free_localization_bad_config.json");
        fs::write(&temp_path, r#"{ "area_width": -3.0 }"#).unwrap();

        let result = ConfigurationManager::from_file(&temp_path);
        assert!(matches!(result, Err(ConfigError::InvalidParameter { .. })));

        fs::write(&temp_path, "not json").unwrap();
        let result = ConfigurationManager::from_file(&temp_path);
        assert!(matches!(result, Err(ConfigError::SerializationError { .. })));

        let _ = fs::remove_file(temp_path);
    }
}
