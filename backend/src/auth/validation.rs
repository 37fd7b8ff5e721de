//! Structural validation of incoming auth payloads.
//!
//! Each request type is a named schema. Checking a payload never touches
//! storage; it only looks at shape, presence and format.

use crate::auth::models::{SigninRequest, SignupRequest};
use crate::errors::{FieldError, ServiceError, ServiceResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

/// A request shape that can be checked before any side effect.
pub trait Schema: DeserializeOwned + Validate {
    const NAME: &'static str;
}

impl Schema for SignupRequest {
    const NAME: &'static str = "signup";
}

impl Schema for SigninRequest {
    const NAME: &'static str = "signin";
}

/// Parses a raw request body as JSON.
pub fn parse_body(body: &[u8]) -> ServiceResult<Value> {
    serde_json::from_slice(body).map_err(|e| {
        ServiceError::malformed_request(format!("Request body is not valid JSON: {}", e))
    })
}

/// Checks `payload` against the schema `S` and returns the typed request.
pub fn validate_payload<S: Schema>(payload: Value) -> ServiceResult<S> {
    if !payload.is_object() {
        return Err(ServiceError::validation(format!(
            "{} payload must be a JSON object",
            S::NAME
        )));
    }

    let request: S = serde_json::from_value(payload).map_err(|e| {
        ServiceError::validation_with_fields(
            format!("Invalid {} payload", S::NAME),
            vec![FieldError {
                field: "body".to_string(),
                message: e.to_string(),
            }],
        )
    })?;

    if let Err(validation_errors) = request.validate() {
        let fields = validation_errors_to_field_errors(&validation_errors);
        let summary = fields
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ServiceError::validation_with_fields(summary, fields));
    }

    Ok(request)
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect();
    // HashMap iteration order is unstable; keep responses deterministic.
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}
