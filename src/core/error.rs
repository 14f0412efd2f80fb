//! Typed errors for validation
//!
//! # Error Categories
//!
//! - [`ValidateError::Invalid`]: one or more rules failed ([`AggregateError`])
//! - [`ValidateError::NotInitialized`]: struct validation ran before setup
//! - [`ValidateError::Engine`]: the violation engine itself failed ([`EngineError`])
//!
//! # Example
//!
//! ```rust,ignore
//! use this_validate::prelude::*;
//!
//! match validator.validate(&body) {
//!     Ok(()) => {}
//!     Err(ValidateError::Invalid(errors)) => {
//!         for message in errors.messages() {
//!             println!("{}", message);
//!         }
//!     }
//!     Err(e) => eprintln!("validator misconfigured: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Any failure a validator can report
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Rule violations, joined into a single message
    #[error(transparent)]
    Invalid(#[from] AggregateError),

    /// Struct validation was called before `initialize`
    #[error("validator is not initialized")]
    NotInitialized,

    /// The violation engine failed before producing violations
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ValidateError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidateError::Invalid(_) => StatusCode::BAD_REQUEST,
            ValidateError::NotInitialized => StatusCode::INTERNAL_SERVER_ERROR,
            ValidateError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidateError::Invalid(_) => "VALIDATION_ERROR",
            ValidateError::NotInitialized => "VALIDATOR_NOT_INITIALIZED",
            ValidateError::Engine(_) => "VALIDATION_ENGINE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ValidateError::Invalid(errors) => {
                Some(serde_json::json!({ "errors": errors.messages() }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ValidateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Aggregate Errors
// =============================================================================

/// Separator between messages of an [`AggregateError`]
pub const MESSAGE_SEPARATOR: &str = ", ";

/// Several failure messages reported as one error
///
/// Never empty: constructing one from zero messages yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub struct AggregateError {
    messages: Vec<String>,
}

impl AggregateError {
    /// Collect `messages`, or `None` when there are none
    pub fn from_messages<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// Individual messages in the order they were reported
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join(MESSAGE_SEPARATOR))
    }
}

// =============================================================================
// Engine Errors
// =============================================================================

/// Failure of the violation engine, distinct from rule violations
#[derive(Debug, Error)]
pub enum EngineError {
    /// The value could not be inspected (serialization failed)
    #[error("failed to inspect value for validation: {0}")]
    Inspect(#[from] serde_json::Error),

    /// Engine-specific failure
    #[error("{0}")]
    Other(String),
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(messages: &[&str]) -> AggregateError {
        let messages = messages.iter().copied();
        AggregateError::from_messages(messages).unwrap()
    }

    #[test]
    fn test_aggregate_requires_messages() {
        let error = AggregateError::from_messages(Vec::<String>::new());
        assert!(error.is_none());
    }

    #[test]
    fn test_aggregate_display_joins() {
        assert_eq!(aggregate(&["a", "b", "c"]).to_string(), "a, b, c");
    }

    #[test]
    fn test_invalid_is_transparent() {
        let err = ValidateError::from(aggregate(&["nameは必須です"]));
        assert_eq!(err.to_string(), "nameは必須です");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ValidateError::from(aggregate(&["x"])).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ValidateError::NotInitialized.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ValidateError::from(EngineError::Other("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ValidateError::from(aggregate(&["x"])).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            ValidateError::NotInitialized.error_code(),
            "VALIDATOR_NOT_INITIALIZED"
        );
        assert_eq!(
            ValidateError::from(EngineError::Other("boom".into())).error_code(),
            "VALIDATION_ENGINE_ERROR"
        );
    }

    #[test]
    fn test_response_details_list_messages() {
        let response = ValidateError::from(aggregate(&["a", "b"])).to_response();
        assert_eq!(response.message, "a, b");
        assert_eq!(
            response.details,
            Some(serde_json::json!({ "errors": ["a", "b"] }))
        );
    }

    #[test]
    fn test_not_initialized_has_no_details() {
        let response = ValidateError::NotInitialized.to_response();
        assert_eq!(response.message, "validator is not initialized");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_engine_error_message_is_unchanged() {
        let err = ValidateError::from(EngineError::Other("bad tag syntax".into()));
        assert_eq!(err.to_string(), "bad tag syntax");
    }
}
