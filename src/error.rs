//! Unified error hierarchy for vdotrs
//!
//! Every failure in the calculator is local and recoverable: the caller gets
//! a typed error describing what was wrong with the input and may retry.

use thiserror::Error;

/// Top-level error type for all vdotrs operations
#[derive(Debug, Error)]
pub enum VdotError {
    /// Time text does not follow the `MM:SS` or `HH:MM:SS` pattern
    #[error("Malformed time: '{input}' (expected MM:SS or HH:MM:SS)")]
    MalformedTime { input: String },

    /// Duration parsed but is zero or negative
    #[error("Duration must be positive, got {seconds} seconds")]
    NonPositiveDuration { seconds: f64 },

    /// Event name has no entry in the formula table
    #[error("Unknown event: {event}")]
    UnknownEvent { event: String },

    /// Formula evaluation produced NaN, infinity, or a non-positive value
    #[error("Non-finite result in {calculation}")]
    NonFiniteResult { calculation: String },

    /// Score sweep bounds cannot produce a table
    #[error("Invalid table sweep: {reason}")]
    InvalidSweep { reason: String },

    /// Custom formula entry failed validation
    #[error("Invalid formula '{label}': {reason}")]
    InvalidFormula { label: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reference table export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// CSV writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for vdotrs operations
pub type Result<T> = std::result::Result<T, VdotError>;

impl VdotError {
    /// True when the error stems from user input and the caller should re-prompt
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            VdotError::MalformedTime { .. }
                | VdotError::NonPositiveDuration { .. }
                | VdotError::UnknownEvent { .. }
                | VdotError::NonFiniteResult { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VdotError::MalformedTime { .. }
            | VdotError::NonPositiveDuration { .. }
            | VdotError::NonFiniteResult { .. }
            | VdotError::InvalidSweep { .. } => ErrorSeverity::Warning,
            // The event selector only offers table keys, so this is a caller defect
            VdotError::UnknownEvent { .. } => ErrorSeverity::Error,
            VdotError::InvalidFormula { .. } | VdotError::Configuration(_) => {
                ErrorSeverity::Error
            }
            VdotError::Export(_) | VdotError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VdotError::MalformedTime { .. } | VdotError::NonPositiveDuration { .. } => {
                "Please enter a valid time in HH:MM:SS or MM:SS format.".to_string()
            }
            VdotError::NonFiniteResult { .. } => {
                "Could not calculate VDOT. Check input.".to_string()
            }
            VdotError::UnknownEvent { event } => {
                format!("'{}' is not a supported event. Run `vdotrs events` for the list.", event)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Bad input; the caller can retry
    Warning,
}
