//! Persistence layer.
//!
//! The auth service only talks to storage through [`AccountStore`], so the
//! SQLite repository can be swapped for a test double.

use crate::database::models::{CreateUser, User};
use crate::errors::ServiceResult;
use async_trait::async_trait;

pub mod user_repository;

/// Data-access interface for user accounts.
///
/// Implementations are the sole authority on email uniqueness: `create_user`
/// must fail with `ServiceError::AlreadyExists` when the email is taken, even
/// under concurrent inserts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account and returns it with its assigned id.
    async fn create_user(&self, user: CreateUser) -> ServiceResult<User>;
    /// Fetches the account registered under `email`, if any.
    async fn get_user_by_email(&self, email: &str) -> ServiceResult<Option<User>>;
    /// Fetches the account with the given id, if any.
    async fn get_user_by_id(&self, id: &str) -> ServiceResult<Option<User>>;
}
