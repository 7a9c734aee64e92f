//! Health and readiness probes against a spawned server.

mod common;

use common::TestApp;
use reqwest::{Client, StatusCode};
use std::time::Duration;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn(Some("sk-test")).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "battlecard-service");
}

#[tokio::test]
async fn readiness_reports_configured_model() {
    let app = TestApp::spawn(Some("sk-test")).await;

    let response = Client::new()
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["model"], "gpt-4o");
}

#[tokio::test]
async fn missing_api_key_degrades_instead_of_crashing() {
    let app = TestApp::spawn(None).await;
    let client = Client::new();

    let health = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to send request");
    assert!(health.status().is_success());

    let ready = client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);

    let generate = client
        .post(format!("{}/api/generate-battlecard", app.address))
        .json(&common::valid_body())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(generate.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = generate.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["error"],
        "OpenAI client not initialized. Check server logs and environment variables."
    );
}
