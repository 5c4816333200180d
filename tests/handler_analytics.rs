mod common;

use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use serde_json::Value;
use shorty::api::handlers::analytics_handler;
use shorty::api::middleware::auth;
use shorty::domain::entities::NewClick;
use shorty::domain::repositories::ClickRepository;
use shorty::infrastructure::persistence::MemoryStore;

fn test_server(state: shorty::AppState) -> TestServer {
    let app = Router::new()
        .route("/me/analytics", get(analytics_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state);

    TestServer::new(app).unwrap()
}

async fn record_clicks(store: &MemoryStore, link_id: i64, count: usize) {
    for _ in 0..count {
        store
            .record_click(NewClick {
                link_id,
                ip: None,
                user_agent: None,
                referer: None,
                country: None,
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_analytics_requires_token() {
    let (state, _rx, _store) = common::create_test_state();
    let server = test_server(state);

    let response = server.get("/me/analytics").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_analytics_empty_account() {
    let (state, _rx, _store) = common::create_test_state();
    let (_user_id, token) = common::register_user(&state, "fresh@example.com").await;

    let server = test_server(state);
    let response = server
        .get("/me/analytics")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["histogram"].as_array().unwrap().len(), 7);
    assert!(
        body["histogram"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["clicks"] == 0)
    );
    assert_eq!(body["growth"]["rate_percent"], 0.0);
    assert_eq!(body["growth"]["trend"], "neutral");
    assert!(body["top_link"].is_null());
}

#[tokio::test]
async fn test_analytics_histogram_counts_todays_clicks() {
    let (state, _rx, store) = common::create_test_state();

    let (user_id, token) = common::register_user(&state, "owner@example.com").await;
    let link = common::create_link(&state, "https://example.com", Some(user_id)).await;
    record_clicks(&store, link.id, 3).await;

    let server = test_server(state);
    let response = server
        .get("/me/analytics")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    let body: Value = response.json();
    let histogram = body["histogram"].as_array().unwrap();

    assert_eq!(histogram.len(), 7);

    // Today is the last bucket and holds all three clicks.
    let today = chrono::Utc::now().date_naive().to_string();
    let last = histogram.last().unwrap();
    assert_eq!(last["date"], today);
    assert_eq!(last["clicks"], 3);

    // Dates ascend.
    let dates: Vec<&str> = histogram.iter().map(|p| p["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn test_analytics_growth_all_current_window() {
    let (state, _rx, store) = common::create_test_state();

    let (user_id, token) = common::register_user(&state, "owner@example.com").await;
    let link = common::create_link(&state, "https://example.com", Some(user_id)).await;
    record_clicks(&store, link.id, 5).await;

    let server = test_server(state);
    let response = server
        .get("/me/analytics")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    let body: Value = response.json();

    // Five clicks now, none in the previous window: +100%, positive.
    assert_eq!(body["growth"]["current_window_clicks"], 5);
    assert_eq!(body["growth"]["previous_window_clicks"], 0);
    assert_eq!(body["growth"]["rate_percent"], 100.0);
    assert_eq!(body["growth"]["trend"], "positive");
}

#[tokio::test]
async fn test_analytics_top_link_tie_breaks_by_creation() {
    let (state, _rx, store) = common::create_test_state();

    let (user_id, token) = common::register_user(&state, "owner@example.com").await;
    let earlier = common::create_link(&state, "https://example.com/b", Some(user_id)).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let later = common::create_link(&state, "https://example.com/a", Some(user_id)).await;

    record_clicks(&store, earlier.id, 5).await;
    record_clicks(&store, later.id, 5).await;

    let server = test_server(state);
    let response = server
        .get("/me/analytics")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    let body: Value = response.json();
    assert_eq!(body["top_link"]["short_code"], earlier.code.as_str());
    assert_eq!(body["top_link"]["clicks"], 5);
}

#[tokio::test]
async fn test_analytics_custom_window() {
    let (state, _rx, _store) = common::create_test_state();
    let (_user_id, token) = common::register_user(&state, "owner@example.com").await;

    let server = test_server(state);
    let response = server
        .get("/me/analytics")
        .add_query_param("days", "30")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    let body: Value = response.json();
    assert_eq!(body["histogram"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn test_analytics_window_clamped() {
    let (state, _rx, _store) = common::create_test_state();
    let (_user_id, token) = common::register_user(&state, "owner@example.com").await;

    let server = test_server(state);
    let response = server
        .get("/me/analytics")
        .add_query_param("days", "5000")
        .add_header("Authorization", format!("Bearer {token}"))
        .await;

    let body: Value = response.json();
    assert_eq!(body["histogram"].as_array().unwrap().len(), 90);
}
