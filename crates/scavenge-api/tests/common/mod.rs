//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use scavenge_core::clock::Clock;
use scavenge_core::rng::DeterministicRng;
use scavenge_store::InMemoryHuntStore;
use scavenge_test_support::{FixedClock, SequenceRng};
use tower::ServiceExt;

use scavenge_api::routes;
use scavenge_api::state::{AppState, HuntSettings};

/// Base URL share links are built on in tests.
pub const PUBLIC_WEB_BASE_URL: &str = "https://hunt.example.com";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 2, 14, 9, 0, 0).unwrap(),
    ))
}

/// Build the full app router over an `InMemoryHuntStore` with a
/// deterministic Clock/RNG. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    let clock = fixed_clock();
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(SequenceRng::new((0..500).collect())));
    let settings = HuntSettings {
        public_web_base_url: PUBLIC_WEB_BASE_URL.to_owned(),
        bypass_code: "safe".to_owned(),
    };
    let app_state = AppState::new(clock, rng, Arc::new(InMemoryHuntStore::new()), settings);

    routes::router().with_state(app_state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, body_bytes.to_vec())
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let (status, body_bytes) = send(app, request).await;
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PUT", uri, body).await
}

/// Send a GET request and return the JSON response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, body_bytes) = send(app, request).await;
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

/// Send a GET request and return the raw text response.
pub async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, body_bytes) = send(app, request).await;
    (status, String::from_utf8(body_bytes).unwrap())
}

/// Create a draft hunt and return its `huntId`.
pub async fn create_hunt(app: &Router, gifted_name: &str) -> String {
    let (status, json) = post_json(
        app,
        "/api/hunts",
        &serde_json::json!({ "giftedName": gifted_name, "welcomeMessage": "Happy birthday!" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["huntId"].as_str().unwrap().to_owned()
}

/// Add a post-it to a hunt and return its `id`.
pub async fn create_post_it(app: &Router, hunt_id: &str, body: serde_json::Value) -> String {
    let (status, json) = post_json(app, &format!("/api/hunts/{hunt_id}/post-its"), &body).await;
    assert_eq!(status, StatusCode::OK, "create post-it failed: {json}");
    json["id"].as_str().unwrap().to_owned()
}

/// Submit an attempt for a card.
pub async fn submit(
    app: &Router,
    hunt_id: &str,
    post_it_id: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_json(
        app,
        &format!("/api/hunts/{hunt_id}/post-its/{post_it_id}/submit"),
        &body,
    )
    .await
}
