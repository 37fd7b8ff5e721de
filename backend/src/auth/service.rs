//! Core business logic for the authentication system.
//!
//! `AuthService` orchestrates validation, the account store and the token
//! issuer for signup and signin. Its public methods are the orchestration
//! boundary: any failure that is not an expected outcome is logged here and
//! replaced by a generic internal error before it reaches a handler.
//!
//! Passwords are stored as bcrypt hashes and signin verifies against the hash.
//! A match still requires both email and password to agree.

use crate::auth::models::*;
use crate::auth::validation::{parse_body, validate_payload};
use crate::config::Config;
use crate::database::models::CreateUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::AccountStore;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::{Claims, JwtUtils, TokenIssuer};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Authentication service for handling signup, signin and token checks
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    tokens: Arc<dyn TokenIssuer>,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create a new AuthService from its collaborators
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: Arc<dyn TokenIssuer>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    /// Wire the SQLite store and JWT issuer from configuration
    pub fn from_config(config: &Config, pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool)),
            Arc::new(JwtUtils::from_config(config)),
            config.bcrypt_cost,
        )
    }

    /// Register a new account from a raw request body and return a session token
    pub async fn signup(&self, body: &[u8]) -> ServiceResult<AuthResponse> {
        self.try_signup(body)
            .await
            .map_err(|error| at_boundary("signup", error))
    }

    /// Authenticate an account from a raw request body and return a session token
    pub async fn signin(&self, body: &[u8]) -> ServiceResult<AuthResponse> {
        self.try_signin(body)
            .await
            .map_err(|error| at_boundary("signin", error))
    }

    /// Verify a bearer token and return its claims
    pub fn authenticate(&self, token: &str) -> ServiceResult<Claims> {
        self.tokens.validate_token(token)
    }

    /// Load the profile of the account a token was issued for
    pub async fn get_profile(&self, claims: &Claims) -> ServiceResult<UserInfo> {
        self.try_get_profile(claims)
            .await
            .map_err(|error| at_boundary("profile", error))
    }

    async fn try_signup(&self, body: &[u8]) -> ServiceResult<AuthResponse> {
        let payload = parse_body(body)?;
        let request: SignupRequest = validate_payload(payload)?;

        let (email, password) = required_credentials(request.email, request.password)?;
        let password_hash = hash_password(password, self.bcrypt_cost).await?;

        let user = self
            .store
            .create_user(CreateUser {
                name: request.name,
                email,
                password_hash,
            })
            .await?;

        let token = self.tokens.generate_token(&user.id)?;

        info!(user_id = %user.id, "Account created");

        Ok(AuthResponse {
            message: "User created successfully".to_string(),
            token,
        })
    }

    async fn try_signin(&self, body: &[u8]) -> ServiceResult<AuthResponse> {
        let payload = parse_body(body)?;
        let request: SigninRequest = validate_payload(payload)?;

        let (email, password) = required_credentials(request.email, request.password)?;

        let user = match self.store.get_user_by_email(&email).await? {
            Some(user) => user,
            None => return Err(ServiceError::not_found(INVALID_CREDENTIALS)),
        };

        if !verify_password(password, user.password_hash).await? {
            return Err(ServiceError::not_found(INVALID_CREDENTIALS));
        }

        let token = self.tokens.generate_token(&user.id)?;

        info!(user_id = %user.id, "Signed in");

        Ok(AuthResponse {
            message: "Signed in successfully".to_string(),
            token,
        })
    }

    async fn try_get_profile(&self, claims: &Claims) -> ServiceResult<UserInfo> {
        let user = self
            .store
            .get_user_by_id(claims.user_id())
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        Ok(UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        })
    }
}

/// Second presence check on the credentials after schema validation.
fn required_credentials(
    email: Option<String>,
    password: Option<String>,
) -> ServiceResult<(String, String)> {
    match (email, password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ServiceError::validation("Email and password are required")),
    }
}

/// Hash a password off the async workers
///
/// bcrypt ignores everything past `MAX_PASSWORD_BYTES`, so longer input is refused
/// rather than hashed into something a different password would also match.
async fn hash_password(password: String, cost: u32) -> ServiceResult<String> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ServiceError::validation("Password must be at most 72 bytes"));
    }

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ServiceError::internal_error(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Verify a password against the stored hash off the async workers
///
/// A password longer than `MAX_PASSWORD_BYTES` never matches.
async fn verify_password(password: String, hash: String) -> ServiceResult<bool> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            ServiceError::internal_error(format!("Password verification task failed: {}", e))
        })?
        .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {}", e)))
}

/// Let expected outcomes through; replace everything else with a generic error.
fn at_boundary(operation: &'static str, error: ServiceError) -> ServiceError {
    if let ServiceError::TokenIssuance { message } = &error {
        error!(operation, %message, "Token issuance failed");
        return error;
    }

    if error.is_expected() {
        debug!(operation, %error, "Request rejected");
        return error;
    }

    error!(operation, %error, "Unexpected failure");
    ServiceError::internal_error("Internal server error")
}
