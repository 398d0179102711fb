//! Error handling for sdk-diagnostics
//!
//! The facade itself never fails: a missing log directory is repaired, not
//! reported. Errors only come from the pluggable parts around it (logger
//! factories and the subscriber installer) and are passed through unchanged.

/// Type alias for results of diagnostics operations
pub type LogResult<T> = Result<T, LogError>;

/// Error type for diagnostics operations
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// Configuration cannot be realized
    #[error("Configuration error: {0}")]
    Config(String),

    /// The subscriber or its file appender could not be set up
    #[error("Subscriber initialization failed: {0}")]
    Init(String),

    /// A logger factory could not produce a logger
    #[error("Logger factory failed for category '{category}': {reason}")]
    Factory {
        /// Category the logger was requested for
        category: String,
        /// Backend-specific reason
        reason: String,
    },
}

impl LogError {
    /// Create a factory error
    pub fn factory(category: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Factory {
            category: category.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_error_message() {
        let error = LogError::factory("SDK Logger", "backend offline");
        assert_eq!(
            error.to_string(),
            "Logger factory failed for category 'SDK Logger': backend offline"
        );
    }
}
