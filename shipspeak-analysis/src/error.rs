//! Error types for shipspeak-analysis
//!
//! One run surfaces exactly one `AnalysisError`. `ErrorKind` is the closed
//! classification callers match on (cancellation is not a failure).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analysis error type
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Empty or malformed transcript (rejected before detection starts)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bad weight vector, unknown career-level pair, unknown tag
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cancellation token fired
    #[error("Analysis cancelled")]
    Cancelled,

    /// Wall-clock budget exceeded
    #[error("Analysis exceeded its {budget_secs}s budget")]
    Timeout { budget_secs: u64 },

    /// Detector panic or unexpected failure
    #[error("Internal error{}: {}", detector_suffix(.detector), .message)]
    Internal {
        detector: Option<String>,
        message: String,
    },

    /// shipspeak-common error
    #[error("Common error: {0}")]
    Common(#[from] shipspeak_common::Error),
}

fn detector_suffix(detector: &Option<String>) -> String {
    detector
        .as_ref()
        .map(|d| format!(" in detector '{}'", d))
        .unwrap_or_default()
}

/// Closed classification of `AnalysisError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    Configuration,
    Cancelled,
    Timeout,
    Internal,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidInput(_) => ErrorKind::InvalidInput,
            AnalysisError::Configuration(_) => ErrorKind::Configuration,
            AnalysisError::Cancelled => ErrorKind::Cancelled,
            AnalysisError::Timeout { .. } => ErrorKind::Timeout,
            AnalysisError::Internal { .. } => ErrorKind::Internal,
            AnalysisError::Common(shipspeak_common::Error::Config(_))
            | AnalysisError::Common(shipspeak_common::Error::Toml(_)) => ErrorKind::Configuration,
            AnalysisError::Common(shipspeak_common::Error::InvalidInput(_)) => {
                ErrorKind::InvalidInput
            }
            AnalysisError::Common(_) => ErrorKind::Internal,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }

    pub(crate) fn internal(detector: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisError::Internal {
            detector: Some(detector.into()),
            message: message.into(),
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_message_names_detector() {
        let err = AnalysisError::internal("industry_vocabulary", "boom");
        assert_eq!(
            err.to_string(),
            "Internal error in detector 'industry_vocabulary': boom"
        );
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_common_config_maps_to_configuration() {
        let err: AnalysisError = shipspeak_common::Error::Config("bad".into()).into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_cancelled_is_distinguishable() {
        assert!(AnalysisError::Cancelled.is_cancelled());
        assert!(!AnalysisError::Timeout { budget_secs: 1 }.is_cancelled());
    }
}
