//! Result and error types for Guion.

use thiserror::Error;

/// Result type for Guion operations
pub type GuionResult<T> = Result<T, GuionError>;

/// Errors that can occur while running a scenario
#[derive(Debug, Error)]
pub enum GuionError {
    /// An action targeted an element that is not in the page.
    ///
    /// Fatal to the affected step, non-fatal to the run: the runner records
    /// the failure and continues with the next step.
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that failed to resolve
        selector: String,
    },

    /// An assertion predicate evaluated false
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// A checkpoint wait exceeded its timeout
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waited_for: String,
    },

    /// The underlying page driver reported a failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Operation called in the wrong runner state
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Recording sink failure (frame capture, encoding, annotation)
    #[error("Recording failed: {message}")]
    Recording {
        /// Error message
        message: String,
    },

    /// A page fixture file could not be parsed
    #[error("Failed to parse page fixture: {0}")]
    Fixture(String),

    /// The scenario definition itself is invalid
    #[error(transparent)]
    Scenario(#[from] crate::scenario::ScenarioError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuionError {
    /// Whether the runner may continue with the next step after this error.
    ///
    /// Assertion failures and missing elements are recorded and the run
    /// proceeds; driver, state, recording, and I/O faults abort it.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::AssertionFailed { .. } | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found_display() {
        let err = GuionError::ElementNotFound {
            selector: "#loginButton".to_string(),
        };
        assert_eq!(err.to_string(), "Element not found: #loginButton");
    }

    #[test]
    fn test_timeout_display() {
        let err = GuionError::Timeout {
            ms: 5000,
            waited_for: "#dialogBox hidden".to_string(),
        };
        assert!(err.to_string().contains("5000ms"));
        assert!(err.to_string().contains("#dialogBox"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(GuionError::ElementNotFound {
            selector: "#x".to_string()
        }
        .is_recoverable());
        assert!(GuionError::AssertionFailed {
            message: "boom".to_string()
        }
        .is_recoverable());
        assert!(GuionError::Timeout {
            ms: 1,
            waited_for: "x".to_string()
        }
        .is_recoverable());
        assert!(!GuionError::Driver {
            message: "gone".to_string()
        }
        .is_recoverable());
        assert!(!GuionError::InvalidState {
            message: "running".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GuionError = io.into();
        assert!(matches!(err, GuionError::Io(_)));
    }
}
