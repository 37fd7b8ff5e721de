//! Response envelope and error-to-HTTP mapping.
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//! - `error.details`: Optional field-specific validation errors
//!
//! # Error Handling Flow
//! 1. Service layer returns a `ServiceError`
//! 2. `service_error_to_http` converts it to a status code and envelope
//! 3. Server-side failures are reported with a fixed message, never their cause

use crate::errors::{FieldError, ServiceError};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    let (status, error_type, message, details) = match error {
        ServiceError::MalformedRequest { message } => {
            (StatusCode::BAD_REQUEST, "malformed_request", message, None)
        }
        // Clients of this API expect 411 for payloads that fail the schema.
        ServiceError::Validation { message, fields } => (
            StatusCode::LENGTH_REQUIRED,
            "validation_error",
            message,
            (!fields.is_empty()).then_some(fields),
        ),
        ServiceError::AlreadyExists { entity, .. } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("{} with this email already exists", entity),
            None,
        ),
        ServiceError::NotFound { message } => (StatusCode::NOT_FOUND, "not_found", message, None),
        ServiceError::Unauthorized { .. } => (
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Invalid or missing token".to_string(),
            None,
        ),
        ServiceError::TokenIssuance { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "token_issuance_error",
            "Could not issue session token".to_string(),
            None,
        ),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
            )
        }
        ServiceError::InternalError { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error".to_string(),
            None,
        ),
    };

    (
        status,
        Json(ApiResponse::<()>::error(message, error_type, details)),
    )
}
