//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Scenario execution ended with failures
    #[error("Scenario failed: {message}")]
    ScenarioFailed {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Guion library error
    #[error(transparent)]
    Guion(#[from] guion::GuionError),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a scenario failure error
    #[must_use]
    pub fn scenario_failed(message: impl Into<String>) -> Self {
        Self::ScenarioFailed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("missing --page");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("--page"));
    }

    #[test]
    fn test_scenario_failed_error() {
        let err = CliError::scenario_failed("2 assertion(s) failed");
        assert!(err.to_string().contains("Scenario failed"));
    }

    #[test]
    fn test_guion_error_from() {
        let err: CliError = guion::GuionError::ElementNotFound {
            selector: "#pages".to_string(),
        }
        .into();
        assert!(err.to_string().contains("#pages"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
