//! Data structures for authentication requests and responses.
//!
//! Request fields are all optional at the type level so that a missing field
//! is reported by the validator as a field error instead of failing
//! deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// bcrypt only looks at this many bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Rejects passwords bcrypt would silently truncate.
fn password_fits_hash(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("Password must be at most 72 bytes".into()));
    }
    Ok(())
}

/// Signup request payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required"),
        custom(function = "password_fits_hash")
    )]
    pub password: Option<String>,
}

/// Signin request payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(
        required(message = "Email is required"),
        email(message = "Must be a valid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Successful signup/signin response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

/// Profile of the authenticated account
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
