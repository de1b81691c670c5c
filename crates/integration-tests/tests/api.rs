//! Integration tests for the Vitrine HTTP API.
//!
//! These tests require:
//! - A running server (cargo run -p vitrine-server) on a scratch
//!   database
//! - Default bootstrap administrator credentials, or matching
//!   `INITIAL_ADMIN_EMAIL` / `INITIAL_ADMIN_PASSWORD` in both processes
//!
//! Run with: cargo test -p vitrine-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("VITRINE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn admin_email() -> String {
    std::env::var("INITIAL_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string())
}

fn admin_password() -> String {
    std::env::var("INITIAL_ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".to_string())
}

/// Test helper: log in as the bootstrap administrator and return the
/// bearer token.
async fn login(client: &Client) -> String {
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": admin_email(), "password": admin_password() }))
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read login response");
    body["token"]
        .as_str()
        .expect("login response has no token")
        .to_string()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_health_endpoints() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach health endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_login_and_verify() {
    let client = Client::new();
    let token = login(&client).await;

    let resp = client
        .get(format!("{}/auth/verify", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to verify token");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read verify response");
    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["user"]["email"], json!(admin_email()));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_login_with_wrong_password_is_unauthorized() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": admin_email(), "password": "definitely-wrong" }))
        .send()
        .await
        .expect("Failed to call login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to read error body");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_admin_routes_reject_missing_and_garbage_tokens() {
    let client = Client::new();

    // No token at all
    let resp = client
        .get(format!("{}/admin/content", base_url()))
        .send()
        .await
        .expect("Failed to call admin route");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Malformed token
    let resp = client
        .get(format!("{}/admin/content", base_url()))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .expect("Failed to call admin route");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Content lifecycle
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_content_create_update_delete_without_image() {
    let client = Client::new();
    let token = login(&client).await;

    // Create a hidden carousel slide (no image part)
    let form = reqwest::multipart::Form::new()
        .text("type", "carousel")
        .text("title", "Integration slide")
        .text("description", "created by the integration tests")
        .text("order_index", "42")
        .text("visible", "false");

    let resp = client
        .post(format!("{}/admin/content", base_url()))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to create content");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("Failed to read created item");
    let id = created["id"].as_i64().expect("created item has no id");
    assert_eq!(created["type"], json!("carousel"));
    assert_eq!(created["order_index"], json!(42));
    assert_eq!(created["visible"], json!(false));

    // Hidden items never show up on the public listing
    let resp = client
        .get(format!("{}/content/carousel", base_url()))
        .send()
        .await
        .expect("Failed to list public content");
    let public: Vec<Value> = resp.json().await.expect("Failed to read public list");
    assert!(public.iter().all(|item| item["id"] != json!(id)));

    // Flip it visible via update
    let form = reqwest::multipart::Form::new()
        .text("type", "carousel")
        .text("title", "Integration slide")
        .text("description", "now visible")
        .text("order_index", "42")
        .text("visible", "true");

    let resp = client
        .put(format!("{}/admin/content/{id}", base_url()))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to update content");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/content/carousel", base_url()))
        .send()
        .await
        .expect("Failed to list public content");
    let public: Vec<Value> = resp.json().await.expect("Failed to read public list");
    assert!(public.iter().any(|item| item["id"] == json!(id)));

    // Clean up
    let resp = client
        .delete(format!("{}/admin/content/{id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete content");
    assert_eq!(resp.status(), StatusCode::OK);

    // Deleting again is a 404 now that the row is gone
    let resp = client
        .delete(format!("{}/admin/content/{id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to call delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Contact form
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_contact_submission_and_mark_read() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/contact", base_url()))
        .json(&json!({
            "name": "Integration Test",
            "email": "visitor@example.com",
            "message": "Hello from the test suite"
        }))
        .send()
        .await
        .expect("Failed to submit contact form");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Missing fields are rejected without creating anything
    let resp = client
        .post(format!("{}/contact", base_url()))
        .json(&json!({ "name": "", "email": "", "message": "" }))
        .send()
        .await
        .expect("Failed to call contact endpoint");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Admin sees the message and can mark it read twice without error
    let token = login(&client).await;
    let resp = client
        .get(format!("{}/admin/contact", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list messages");
    assert_eq!(resp.status(), StatusCode::OK);
    let messages: Vec<Value> = resp.json().await.expect("Failed to read messages");
    let id = messages
        .iter()
        .find(|m| m["email"] == json!("visitor@example.com"))
        .and_then(|m| m["id"].as_i64())
        .expect("submitted message not listed");

    for _ in 0..2 {
        let resp = client
            .put(format!("{}/admin/contact/{id}/read", base_url()))
            .bearer_auth(&token)
            .send()
            .await
            .expect("Failed to mark message read");
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
