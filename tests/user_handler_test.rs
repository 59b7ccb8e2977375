mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use common::{send, send_json, setup_app, setup_app_with_users, InMemoryUserRepository};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;

async fn create_user(app: &axum::Router, username: &str, email: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/users",
        Some(json!({ "username": username, "password": "p", "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_create_user_then_duplicate() {
    let app = setup_app();
    let body = json!({ "username": "a", "password": "p", "email": "a@x.com" });

    let (status, created) = send_json(&app.router, "POST", "/users", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["_id"].as_str().unwrap().len(), 24);
    assert!(created["createdAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(created["favoriteMovies"], json!([]));

    let (status, message) = send(&app.router, "POST", "/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.starts_with("E11000 duplicate key error"));
    assert_eq!(app.users.count(), 1);
}

#[tokio::test]
async fn test_duplicate_email_with_new_username_is_rejected() {
    let app = setup_app();
    create_user(&app.router, "a", "a@x.com").await;
    let (status, message) = send(
        &app.router,
        "POST",
        "/users",
        Some(json!({ "username": "b", "password": "p", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.contains("email_1"));
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let app = setup_app();
    let (status, message) = send(&app.router, "POST", "/users", Some(json!({ "username": "a" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "User validation failed: password: Path `password` is required., email: Path `email` is required."
    );
    assert_eq!(app.users.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_create_user_casts_scalar_credentials() {
    let app = setup_app();
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/users",
        Some(json!({ "username": "a", "password": 1234, "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["password"], "1234");
}

#[tokio::test]
async fn test_list_users_exposes_passwords() {
    let app = setup_app();
    create_user(&app.router, "a", "a@x.com").await;
    create_user(&app.router, "b", "b@x.com").await;
    let (status, body) = send_json(&app.router, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["password"], "p");
}

#[tokio::test]
async fn test_update_user_merges_fields() {
    let app = setup_app();
    let user = create_user(&app.router, "a", "a@x.com").await;
    let id = user["_id"].as_str().unwrap();

    let (status, body) = send_json(
        &app.router,
        "PUT",
        &format!("/users/{}", id),
        Some(json!({ "email": "new@x.com", "dateOfBirth": "1990-05-17" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "a");
    assert_eq!(body["email"], "new@x.com");
    assert_eq!(body["dateOfBirth"], "1990-05-17T00:00:00.000Z");
    assert_eq!(body["createdAt"], user["createdAt"]);
}

#[tokio::test]
async fn test_update_without_body_returns_current_document() {
    let app = setup_app();
    let user = create_user(&app.router, "a", "a@x.com").await;
    let (status, body) = send_json(&app.router, "PUT", &format!("/users/{}", user["_id"].as_str().unwrap()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, user);
}

#[tokio::test]
async fn test_update_with_malformed_id_never_queries() {
    let app = setup_app();
    let (status, message) = send(
        &app.router,
        "PUT",
        "/users/not-an-object-id",
        Some(json!({ "email": "x@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Invalid user ID format");
    assert_eq!(app.users.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_update_unknown_user_returns_null() {
    let app = setup_app();
    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("/users/{}", ObjectId::new().to_hex()),
        Some(json!({ "email": "x@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "null");
}

#[tokio::test]
async fn test_update_into_taken_username_is_rejected() {
    let app = setup_app();
    create_user(&app.router, "a", "a@x.com").await;
    let b = create_user(&app.router, "b", "b@x.com").await;
    let (status, _) = send(
        &app.router,
        "PUT",
        &format!("/users/{}", b["_id"].as_str().unwrap()),
        Some(json!({ "username": "a" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_favorite_twice_keeps_one_entry() {
    let app = setup_app();
    let user = create_user(&app.router, "a", "a@x.com").await;
    let uri = format!("/users/{}/favorites/{}", user["_id"].as_str().unwrap(), ObjectId::new().to_hex());

    let (status, first) = send_json(&app.router, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["favoriteMovies"].as_array().unwrap().len(), 1);

    let (status, second) = send_json(&app.router, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["favoriteMovies"], first["favoriteMovies"]);
}

#[tokio::test]
async fn test_remove_favorite_never_added_is_noop() {
    let app = setup_app();
    let user = create_user(&app.router, "a", "a@x.com").await;
    let id = user["_id"].as_str().unwrap();
    let kept = ObjectId::new().to_hex();
    send_json(&app.router, "POST", &format!("/users/{}/favorites/{}", id, kept), None).await;

    let uri = format!("/users/{}/favorites/{}", id, ObjectId::new().to_hex());
    let (status, body) = send_json(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favoriteMovies"], json!([kept]));

    let uri = format!("/users/{}/favorites/{}", id, kept);
    let (status, body) = send_json(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favoriteMovies"], json!([]));
}

#[tokio::test]
async fn test_favorites_with_malformed_ids() {
    let app = setup_app();
    let user = create_user(&app.router, "a", "a@x.com").await;
    let calls_before = app.users.calls.load(Ordering::SeqCst);

    let uri = format!("/users/{}/favorites/xyz", user["_id"].as_str().unwrap());
    let (status, message) = send(&app.router, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Invalid user or movie ID format");

    let uri = format!("/users/xyz/favorites/{}", ObjectId::new().to_hex());
    let (status, _) = send(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.users.calls.load(Ordering::SeqCst), calls_before);
}

#[tokio::test]
async fn test_delete_user_twice_succeeds() {
    let app = setup_app();
    let user = create_user(&app.router, "a", "a@x.com").await;
    let uri = format!("/users/{}", user["_id"].as_str().unwrap());

    let (status, body) = send(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "User deleted");
    assert_eq!(app.users.count(), 0);

    let (status, body) = send(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "User deleted");
}

#[tokio::test]
async fn test_delete_with_malformed_id() {
    let app = setup_app();
    let (status, message) = send(&app.router, "DELETE", "/users/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Invalid user ID format");
}

#[tokio::test]
async fn test_list_users_database_failure_is_500() {
    let app = setup_app_with_users(Arc::new(InMemoryUserRepository::failing()));
    let (status, _) = send(&app.router, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_user_writes_report_database_failure_as_400() {
    let app = setup_app_with_users(Arc::new(InMemoryUserRepository::failing()));
    let id = ObjectId::new().to_hex();
    let favorite = format!("/users/{}/favorites/{}", id, ObjectId::new().to_hex());
    let requests = [
        ("POST", "/users".to_string(), Some(json!({ "username": "a", "password": "p", "email": "a@x.com" }))),
        ("PUT", format!("/users/{}", id), Some(json!({ "email": "x@x.com" }))),
        ("POST", favorite.clone(), None),
        ("DELETE", favorite, None),
        ("DELETE", format!("/users/{}", id), None),
    ];
    for (method, uri, body) in requests {
        let (status, message) = send(&app.router, method, &uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(message, "not primary and secondaryOk=false", "{} {}", method, uri);
    }
    assert_eq!(app.users.calls.load(Ordering::SeqCst), 5);
}
