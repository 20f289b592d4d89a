//! Authentication API integration tests
//!
//! Login and refresh endpoints, including the identity claims carried by
//! the issued tokens.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_test_user, TestApp, STRONG_PASSWORD};
use userauths::backend::auth::sessions::TokenType;
use userauths::shared::NON_FIELD_ERRORS;

const BAD_CREDENTIALS: &str = "No active account found with the given credentials";

#[tokio::test]
async fn test_login_success_returns_pair_and_user() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.state, "test@example.com", STRONG_PASSWORD).await;

    let (status, body) = app.login("test@example.com", STRONG_PASSWORD).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());
    assert_eq!(
        body["user"],
        json!({
            "id": user.id,
            "username": "test",
            "email": "test@example.com",
            "first_name": "Test",
            "last_name": "Person",
            "full_name": "Test Person",
        })
    );
}

#[tokio::test]
async fn test_login_token_carries_identity_claims() {
    let app = TestApp::new().await;
    let user = create_test_user(&app.state, "claims@example.com", STRONG_PASSWORD).await;

    let access = app.access_token("claims@example.com", STRONG_PASSWORD).await;
    let claims = app.state.jwt.verify_token(&access, TokenType::Access).unwrap();

    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.username, "claims");
    assert_eq!(claims.email, "claims@example.com");
    assert_eq!(claims.full_name, "Test Person");
    assert_eq!(claims.token_type, TokenType::Access);
    assert!(claims.exp > claims.iat);
    assert!(!claims.jti.is_empty());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    create_test_user(&app.state, "test@example.com", STRONG_PASSWORD).await;

    let (status, body) = app.login("test@example.com", "wrong-password").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": BAD_CREDENTIALS }));
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::new().await;

    let (status, body) = app.login("ghost@example.com", STRONG_PASSWORD).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": BAD_CREDENTIALS }));
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/v1/user/token/", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    crate::common::assert_field_error(&body, "email", "This field is required.");
    crate::common::assert_field_error(&body, "password", "This field is required.");
}

#[tokio::test]
async fn test_login_with_padded_email() {
    let app = TestApp::new().await;
    create_test_user(&app.state, "test@example.com", STRONG_PASSWORD).await;

    let (status, body) = app.login(" test@example.com  ", STRONG_PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
}

#[tokio::test]
async fn test_login_without_body_is_field_map() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::POST, "/api/v1/user/token/", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body[NON_FIELD_ERRORS].is_array(), "{}", body);
}

#[tokio::test]
async fn test_refresh_returns_access_with_same_claims() {
    let app = TestApp::new().await;
    create_test_user(&app.state, "refresh@example.com", STRONG_PASSWORD).await;
    let (_, login) = app.login("refresh@example.com", STRONG_PASSWORD).await;

    let (status, body) = app
        .post("/api/v1/user/token/refresh/", json!({ "refresh": login["refresh"] }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let original = app
        .state
        .jwt
        .verify_token(login["access"].as_str().unwrap(), TokenType::Access)
        .unwrap();
    let refreshed = app
        .state
        .jwt
        .verify_token(body["access"].as_str().unwrap(), TokenType::Access)
        .unwrap();
    assert_eq!(refreshed.user_id, original.user_id);
    assert_eq!(refreshed.username, original.username);
    assert_eq!(refreshed.email, original.email);
    assert_eq!(refreshed.full_name, original.full_name);
    assert_ne!(refreshed.jti, original.jti);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new().await;
    create_test_user(&app.state, "refresh@example.com", STRONG_PASSWORD).await;
    let access = app.access_token("refresh@example.com", STRONG_PASSWORD).await;

    let (status, body) = app.post("/api/v1/user/token/refresh/", json!({ "refresh": access })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "detail": "Token is invalid or expired", "code": "token_not_valid" })
    );
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/v1/user/token/refresh/", json!({ "refresh": "not.a.token" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
