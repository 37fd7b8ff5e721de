//! Handler functions for authentication-related API endpoints.
//!
//! Handlers take the raw body so that unparseable JSON and schema failures are
//! told apart by the service rather than rejected by an extractor.

use crate::api::common::{ApiError, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::Claims;
use axum::{
    body::Bytes,
    extract::{Extension, Json},
    response::Json as ResponseJson,
};

/// Handle account creation request
#[axum::debug_handler]
pub async fn signup(
    Extension(auth_service): Extension<AuthService>,
    body: Bytes,
) -> Result<ResponseJson<AuthResponse>, ApiError> {
    match auth_service.signup(&body).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle signin request
#[axum::debug_handler]
pub async fn signin(
    Extension(auth_service): Extension<AuthService>,
    body: Bytes,
) -> Result<ResponseJson<AuthResponse>, ApiError> {
    match auth_service.signin(&body).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(auth_service): Extension<AuthService>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserInfo>, ApiError> {
    auth_service
        .get_profile(&claims)
        .await
        .map(Json)
        .map_err(service_error_to_http)
}
