//! Authentication module for account signup, signin and token-protected access.
//!
//! This module provides the public interface for user authentication-related
//! functionality: payload validation, the orchestrating service, HTTP handlers
//! and the bearer-token middleware.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod validation;
