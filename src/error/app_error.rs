use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single schema violation, addressed by request part and JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationFieldError {
    /// `params`, `querystring` or `body`, optionally followed by `/<pointer>`
    #[schema(example = "params/drink")]
    pub field: String,
    /// Human readable reason reported by the schema validator
    #[schema(example = "\"latte\" is not one of [\"tea\",\"coffee\",\"chai\"]")]
    pub message: String,
}

impl ValidationFieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-wide error type for the HTTP layer.
///
/// Request data that does not match its schema never reaches a handler; it
/// is turned into `ValidationErrors` by the validating extractors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request data failed schema validation
    #[error("Request validation failed: {} error(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Request body is not JSON
    #[error("Unsupported media type: {message}")]
    UnsupportedMediaType { message: String },

    /// Request body exceeds the configured limit
    #[error("Payload too large: {message}")]
    PayloadTooLarge { message: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for a validation failure on one field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ValidationErrors {
            errors: vec![ValidationFieldError::new(field, message)],
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_shorthand() {
        let error = AppError::validation("body", "\"kind\" is a required property");
        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "body");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_display_counts_errors() {
        let error = AppError::ValidationErrors {
            errors: vec![
                ValidationFieldError::new("querystring/milk", "bad"),
                ValidationFieldError::new("querystring", "extra"),
            ],
        };
        assert_eq!(error.to_string(), "Request validation failed: 2 error(s)");
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let error: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(error, AppError::Internal { .. }));
        assert_eq!(error.to_string(), "Internal error");
    }
}
