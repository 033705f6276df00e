use std::fmt;

use crate::utils::config::ConfigError;

/// Failures surfaced to the caller by the localization core.
///
/// An estimate with no anchor in range is not an error; it is reported as
/// `None` through the estimate, the error and every mean computed over them.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalizationError {
    /// An input is outside its valid domain or inconsistent with another input
    InvalidInput {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Simulation configuration was rejected
    Config(ConfigError),
}

/// Result type for localization operations
pub type LocalizationResult<T> = Result<T, LocalizationError>;

impl LocalizationError {
    pub fn invalid_input(parameter: &str, value: impl fmt::Display, reason: &str) -> Self {
        LocalizationError::InvalidInput {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure comes from a malformed input rather than I/O
    pub fn is_invalid_input(&self) -> bool {
        match self {
            LocalizationError::InvalidInput { .. } => true,
            LocalizationError::Config(config_error) => config_error.is_invalid_parameter(),
        }
    }
}

impl From<ConfigError> for LocalizationError {
    fn from(error: ConfigError) -> Self {
        LocalizationError::Config(error)
    }
}

impl fmt::Display for LocalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizationError::InvalidInput { parameter, value, reason } => {
                write!(f, "Invalid input for '{}' = {}: {}", parameter, value, reason)
            }
            LocalizationError::Config(error) => write!(f, "Configuration error: {}", error),
        }
    }
}

impl std::error::Error for LocalizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocalizationError::Config(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let error = LocalizationError::invalid_input("distances", "length 2", "expected 3 readings");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'distances' = length 2: expected 3 readings"
        );
        assert!(error.is_invalid_input());
    }

    #[test]
    fn test_config_error_conversion() {
        let config_error = ConfigError::InvalidParameter {
            parameter: "area_width".to_string(),
            value: "-1".to_string(),
            reason: "must be positive".to_string(),
        };
        let error: LocalizationError = config_error.clone().into();

        assert_eq!(error, LocalizationError::Config(config_error));
        assert!(error.is_invalid_input());
        assert!(error.to_string().contains("area_width"));
    }

    #[test]
    fn test_io_error_is_not_invalid_input() {
        let error = LocalizationError::from(ConfigError::IoError {
            message: "not found".to_string(),
        });
        assert!(!error.is_invalid_input());
    }
}
