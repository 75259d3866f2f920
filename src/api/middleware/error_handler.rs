//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError and provides
//! the global middleware that gives every error response, including the
//! ones axum produces on its own, the same JSON envelope and request ID.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Largest error body the global handler will buffer for rewriting.
const MAX_ERROR_BODY: usize = 64 * 1024;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - ValidationErrors → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - UnsupportedMediaType → 415 UNSUPPORTED_MEDIA_TYPE
    /// - PayloadTooLarge → 413 PAYLOAD_TOO_LARGE
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);

        let error_response = match &self {
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new(code, "Request validation failed")
                    .with_details(serde_json::to_value(errors).unwrap_or(Value::Null))
            }
            AppError::BadRequest { message }
            | AppError::UnsupportedMediaType { message }
            | AppError::PayloadTooLarge { message } => ErrorResponse::new(code, message),
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error while handling request");
                ErrorResponse::new(code, "An internal error occurred")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
        AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Global error handling middleware.
///
/// Error responses that already carry JSON get the request ID added to
/// their envelope. Anything else with a 4xx/5xx status (axum's plain-text
/// 404 and 405, the timeout layer's 408) is rewritten into an
/// [`ErrorResponse`]. Headers such as `allow` are preserved.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());

    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let (mut parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, MAX_ERROR_BODY)
        .await
        .unwrap_or_else(|_| Bytes::new());

    let envelope = if is_json {
        match serde_json::from_slice::<Value>(&body_bytes) {
            Ok(Value::Object(mut object)) => {
                if let Some(id) = &request_id {
                    object
                        .entry("request_id")
                        .or_insert_with(|| Value::String(id.clone()));
                }
                Value::Object(object)
            }
            _ => {
                parts.headers.remove(header::CONTENT_LENGTH);
                return Response::from_parts(parts, Body::from(body_bytes));
            }
        }
    } else {
        let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();
        let mut error_response = status_to_error_response(status, original_message);
        if let Some(id) = &request_id {
            error_response = error_response.with_request_id(id);
        }
        serde_json::to_value(error_response).unwrap_or(Value::Null)
    };

    let body = serde_json::to_vec(&envelope).unwrap_or_default();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(body))
}

/// Builds the envelope for an error response produced outside the handlers.
fn status_to_error_response(status: StatusCode, original_message: String) -> ErrorResponse {
    let (code, fallback) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request payload too large"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::INTERNAL_SERVER_ERROR => {
            // Never echo an internal body back to the client
            return ErrorResponse::new("INTERNAL_ERROR", "An internal server error occurred");
        }
        StatusCode::SERVICE_UNAVAILABLE => ("SERVICE_UNAVAILABLE", "Service temporarily unavailable"),
        s if s.is_server_error() => ("SERVER_ERROR", "An unexpected server error occurred"),
        _ => ("CLIENT_ERROR", "The request could not be processed"),
    };

    if original_message.is_empty() {
        ErrorResponse::new(code, fallback)
    } else {
        ErrorResponse::new(code, &original_message)
    }
}
