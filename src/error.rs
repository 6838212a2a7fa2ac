//! Error types for Toolboard
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::gateway::RequestError;

/// All error types that can occur in Toolboard
#[derive(Debug, Error)]
pub enum ToolboardError {
    /// A gateway request failed
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// The gateway answered with something other than a tool list
    #[error("Invalid payload: {0}")]
    Payload(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Toolboard operations
pub type Result<T> = std::result::Result<T, ToolboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error() {
        let err = ToolboardError::Payload("expected a list".to_string());
        assert_eq!(err.to_string(), "Invalid payload: expected a list");
    }

    #[test]
    fn test_request_error_conversion() {
        let req_err = RequestError::Construction {
            message: "relative URL without a base".to_string(),
        };
        let err: ToolboardError = req_err.into();
        assert!(matches!(err, ToolboardError::Request(_)));
        assert!(err.to_string().contains("relative URL without a base"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolboardError = io_err.into();
        assert!(matches!(err, ToolboardError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ToolboardError = json_err.into();
        assert!(matches!(err, ToolboardError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<usize> {
            Ok(3)
        }

        fn returns_err() -> Result<usize> {
            Err(ToolboardError::Payload("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
