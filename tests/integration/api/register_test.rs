//! Registration API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use std::sync::Arc;

use crate::common::{assert_field_error, field_messages, row_counts, TestApp, STRONG_PASSWORD};
use userauths::backend::auth::accounts::EMAIL_TAKEN;
use userauths::backend::auth::profiles::get_profile_by_user_id;

#[tokio::test]
async fn test_register_creates_account_and_profile() {
    let app = TestApp::new().await;

    let (status, body) = app.register("ada.lovelace@example.com", STRONG_PASSWORD, "Ada", "Lovelace").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "ada.lovelace");
    assert_eq!(body["full_name"], "Ada Lovelace");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let id = body["id"].as_i64().unwrap();
    let profile = get_profile_by_user_id(&app.state.db, id).await.unwrap().unwrap();
    assert_eq!(profile.full_name, "Ada Lovelace");
    assert_eq!(profile.image.as_deref(), Some("default.jpg"));
}

#[tokio::test]
async fn test_registered_user_can_log_in() {
    let app = TestApp::new().await;
    app.register("grace@example.com", STRONG_PASSWORD, "Grace", "Hopper").await;

    let (status, body) = app.login("grace@example.com", STRONG_PASSWORD).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "grace");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let (first, _) = app.register("dup@example.com", STRONG_PASSWORD, "A", "B").await;
    assert_eq!(first, StatusCode::CREATED);

    let (status, body) = app.register("dup@example.com", STRONG_PASSWORD, "C", "D").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "email", "user with this email already exists.");
    assert_eq!(row_counts(&app.state.db).await, (1, 1));
}

#[tokio::test]
async fn test_register_password_mismatch_creates_nothing() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/v1/user/register/",
            json!({
                "email": "mismatch@example.com",
                "password": STRONG_PASSWORD,
                "password2": "Something-Else-99",
                "first_name": "Mis",
                "last_name": "Match",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "password": ["Password fields didn't match."] }));
    assert_eq!(row_counts(&app.state.db).await, (0, 0));
}

#[tokio::test]
async fn test_register_missing_and_blank_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/user/register/", json!({ "email": "", "first_name": "  " }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "email", "This field may not be blank.");
    assert_field_error(&body, "first_name", "This field may not be blank.");
    assert_field_error(&body, "password", "This field is required.");
    assert_field_error(&body, "password2", "This field is required.");
    assert_field_error(&body, "last_name", "This field is required.");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::new().await;

    let (status, body) = app.register("not-an-email", STRONG_PASSWORD, "A", "B").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(&body, "email", "Enter a valid email address.");
}

#[tokio::test]
async fn test_register_weak_password_reports_every_failure() {
    let app = TestApp::new().await;

    let (status, body) = app.register("weak@example.com", "1234567", "Weak", "Password").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_field_error(
        &body,
        "password",
        "This password is too short. It must contain at least 8 characters.",
    );
    assert_field_error(&body, "password", "This password is too common.");
    assert_field_error(&body, "password", "This password is entirely numeric.");
}

#[tokio::test]
async fn test_register_password_similar_to_email() {
    let app = TestApp::new().await;

    let (status, body) = app.register("moonlight@example.com", "Moonlight1", "Ann", "Lee").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let messages = crate::common::field_messages(&body, "password");
    assert!(
        messages.iter().any(|m| m.starts_with("The password is too similar to the")),
        "unexpected messages {:?}",
        messages
    );
}

#[tokio::test]
async fn test_register_colliding_prefixes_get_distinct_handles() {
    let app = TestApp::new().await;

    let (_, a) = app.register("sam@one.example", STRONG_PASSWORD, "Sam", "One").await;
    let (_, b) = app.register("sam@two.example", STRONG_PASSWORD, "Sam", "Two").await;

    assert_eq!(a["username"], "sam");
    assert_eq!(b["username"], "sam1");
}

#[tokio::test]
async fn test_wrong_typed_field_is_field_map() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/v1/user/register/",
            json!({
                "email": 5,
                "password": STRONG_PASSWORD,
                "password2": STRONG_PASSWORD,
                "first_name": "Ada",
                "last_name": "Lovelace",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let messages = field_messages(&body, "email");
    assert_eq!(messages.len(), 1, "{}", body);
    assert!(messages[0].contains("expected a string"), "{}", body);
    assert_eq!(row_counts(&app.state.db).await, (0, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_get_unique_handles() {
    let app = Arc::new(TestApp::on_disk().await);

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let app = Arc::clone(&app);
            tokio::spawn(async move {
                app.register(&format!("same@h{}.example", i), STRONG_PASSWORD, "X", "Y").await
            })
        })
        .collect();

    let mut handles = Vec::new();
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        handles.push(body["username"].as_str().unwrap().to_string());
    }

    handles.sort();
    handles.dedup();
    assert_eq!(handles.len(), 10);
    assert!(handles.iter().all(|h| h.starts_with("same")));
    assert_eq!(row_counts(&app.state.db).await, (10, 10));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_email_reports_field_error() {
    let app = Arc::new(TestApp::on_disk().await);

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let app = Arc::clone(&app);
            tokio::spawn(async move { app.register("twin@example.com", STRONG_PASSWORD, "X", "Y").await })
        })
        .collect();

    let mut created = 0;
    for task in tasks {
        let (status, body) = task.await.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => assert_field_error(&body, "email", EMAIL_TAKEN),
            other => panic!("unexpected {} {}", other, body),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(row_counts(&app.state.db).await, (1, 1));
}
