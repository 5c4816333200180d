mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::{Value, json};
use shorty::api::handlers::{login_handler, register_handler};

fn test_server(state: shorty::AppState) -> TestServer {
    let app = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_register_returns_token() {
    let (state, _rx, _store) = common::create_test_state();
    let auth_service = state.auth_service.clone();
    let server = test_server(state);

    let response = server
        .post("/register")
        .json(&json!({ "email": "new@example.com", "password": "correct-horse" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    let token = body["token"].as_str().unwrap();
    assert!(auth_service.verify_token(token).is_ok());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (state, _rx, _store) = common::create_test_state();
    let server = test_server(state);

    let payload = json!({ "email": "dup@example.com", "password": "correct-horse" });

    let first = server.post("/register").json(&payload).await;
    assert_eq!(first.status_code(), 201);

    let second = server.post("/register").json(&payload).await;
    assert_eq!(second.status_code(), 409);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let (state, _rx, _store) = common::create_test_state();
    let server = test_server(state);

    let response = server
        .post("/register")
        .json(&json!({ "email": "not-an-email", "password": "correct-horse" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_register_short_password() {
    let (state, _rx, _store) = common::create_test_state();
    let server = test_server(state);

    let response = server
        .post("/register")
        .json(&json!({ "email": "a@example.com", "password": "short" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_login_success() {
    let (state, _rx, _store) = common::create_test_state();
    let (user_id, _token) = common::register_user(&state, "login@example.com").await;
    let auth_service = state.auth_service.clone();
    let server = test_server(state);

    let response = server
        .post("/login")
        .json(&json!({ "email": "login@example.com", "password": "correct-horse" }))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let token = body["token"].as_str().unwrap();
    assert_eq!(auth_service.verify_token(token).unwrap(), user_id);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (state, _rx, _store) = common::create_test_state();
    common::register_user(&state, "login@example.com").await;
    let server = test_server(state);

    let response = server
        .post("/login")
        .json(&json!({ "email": "login@example.com", "password": "wrong-password" }))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (state, _rx, _store) = common::create_test_state();
    let server = test_server(state);

    let response = server
        .post("/login")
        .json(&json!({ "email": "nobody@example.com", "password": "correct-horse" }))
        .await;

    assert_eq!(response.status_code(), 401);
}
