//! Middleware for protecting authenticated routes.
//!
//! Expects the `AuthService` extension to be installed on an outer layer.

use crate::api::common::{ApiError, service_error_to_http};
use crate::auth::service::AuthService;
use crate::errors::ServiceError;
use axum::{extract::Request, http::header::AUTHORIZATION, middleware::Next, response::Response};

/// JWT authentication middleware
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_service = request
        .extensions()
        .get::<AuthService>()
        .cloned()
        .ok_or_else(|| {
            service_error_to_http(ServiceError::internal_error("AuthService extension missing"))
        })?;

    // Extract Authorization header
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| service_error_to_http(ServiceError::unauthorized("Missing bearer token")))?;

    let claims = auth_service
        .authenticate(token)
        .map_err(service_error_to_http)?;

    // Add claims to request extensions for use in handlers
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
