//! Promred error types

/// Errors raised by the instrumentation layer itself.
///
/// Failures of the wrapped backends never show up here: they are counted and
/// handed back to the caller exactly as the backend produced them.
#[derive(Debug, thiserror::Error)]
pub enum PromredError {
    // Registration errors
    #[error("metric '{name}' is already registered")]
    RegistrationConflict { name: String },

    #[error("invalid metric name: {0}")]
    InvalidMetricName(String),

    #[error("invalid label schema: {0}")]
    InvalidSchema(String),

    // Recording errors
    /// The labels supplied for a recording do not match the instrument's
    /// registered label names.
    #[error("label mismatch for '{instrument}': expected [{expected}], got [{actual}]")]
    LabelArityMismatch {
        instrument: String,
        expected: String,
        actual: String,
    },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PromredError {
    /// Whether this error is a registration-time conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, PromredError::RegistrationConflict { .. })
    }
}

/// Result type alias for Promred operations
pub type Result<T> = std::result::Result<T, PromredError>;
