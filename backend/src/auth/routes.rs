//! Defines the HTTP routes for authentication.
//!
//! The router expects an `Extension<AuthService>` layer to be added by the caller.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::service::AuthService;
    use crate::database::memory_pool;
    use crate::repositories::user_repository::UserRepository;
    use crate::utils::jwt::{JwtUtils, TokenIssuer};
    use axum::{
        Extension,
        body::{Body, to_bytes},
        http::{
            Request, StatusCode,
            header::{AUTHORIZATION, CONTENT_TYPE},
        },
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "route-secret";

    async fn test_app() -> Router {
        let service = AuthService::new(
            Arc::new(UserRepository::new(memory_pool().await)),
            Arc::new(JwtUtils::new(SECRET, 3600)),
            4,
        );
        auth_router().layer(Extension(service))
    }

    async fn post_json(app: &Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        read(response).await
    }

    async fn read(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let app = test_app().await;
        let payload = json!({"email": "a@x.com", "password": "p1"}).to_string();

        let (status, body) = post_json(&app, "/signup", payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["token"].as_str().unwrap().is_empty());
        assert!(body["message"].is_string());

        let (status, body) = post_json(&app, "/signup", payload).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["error_type"], "already_exists");
    }

    #[tokio::test]
    async fn test_signup_missing_password() {
        let app = test_app().await;

        let (status, body) = post_json(&app, "/signup", json!({"email": ""}).to_string()).await;

        assert_eq!(status, StatusCode::LENGTH_REQUIRED);
        assert!(body["message"].is_string());
        assert_eq!(body["error"]["error_type"], "validation_error");
    }

    #[tokio::test]
    async fn test_signup_non_json_body() {
        let app = test_app().await;

        let (status, body) = post_json(&app, "/signup", "email=a@x.com").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["error_type"], "malformed_request");
    }

    #[tokio::test]
    async fn test_signin_outcomes() {
        let app = test_app().await;
        post_json(
            &app,
            "/signup",
            json!({"email": "a@x.com", "password": "p1"}).to_string(),
        )
        .await;

        let (status, body) = post_json(
            &app,
            "/signin",
            json!({"email": "a@x.com", "password": "p1"}).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert!(JwtUtils::new(SECRET, 3600).validate_token(token).is_ok());

        let (status, wrong_password) = post_json(
            &app,
            "/signin",
            json!({"email": "a@x.com", "password": "wrong"}).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, unknown_email) = post_json(
            &app,
            "/signin",
            json!({"email": "z@x.com", "password": "p1"}).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(wrong_password["message"], unknown_email["message"]);

        let (status, _) = post_json(&app, "/signin", json!({"email": "a@x.com"}).to_string()).await;
        assert_eq!(status, StatusCode::LENGTH_REQUIRED);
    }

    #[tokio::test]
    async fn test_me_requires_valid_token() {
        let app = test_app().await;
        let (_, body) = post_json(
            &app,
            "/signup",
            json!({"name": "Ada", "email": "a@x.com", "password": "p1"}).to_string(),
        )
        .await;
        let token = body["token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let (status, profile) = read(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["email"], "a@x.com");
        assert_eq!(profile["name"], "Ada");
        assert!(profile.get("password_hash").is_none());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let forged = JwtUtils::new("other-secret", 3600)
            .generate_token("someone")
            .unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(AUTHORIZATION, format!("Bearer {forged}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
