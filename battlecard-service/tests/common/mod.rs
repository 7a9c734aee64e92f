//! Shared helpers for battlecard-service integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use battlecard_service::config::{BattlecardConfig, OpenAiConfig, SubmissionLogConfig};
use battlecard_service::services::providers::mock::MockCompletionProvider;
use battlecard_service::services::{BattlecardGenerator, CsvSubmissionLog};
use battlecard_service::startup::{build_router, AppState, Application};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const GENERATE_PATH: &str = "/api/generate-battlecard";
pub const SUBMISSIONS_FILE: &str = "submissions.csv";

/// Router wired to a mock provider and a CSV log inside a temp directory.
pub struct TestRouter {
    pub router: Router,
    pub provider: Option<Arc<MockCompletionProvider>>,
    pub log_dir: PathBuf,
    _tmp: TempDir,
}

impl TestRouter {
    pub fn new(provider: Option<MockCompletionProvider>) -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let log_dir = tmp.path().join("data");
        let provider = provider.map(Arc::new);

        let state = AppState {
            generator: provider
                .clone()
                .map(|p| BattlecardGenerator::new(p, "gpt-4o")),
            submissions: Arc::new(CsvSubmissionLog::new(&log_dir, SUBMISSIONS_FILE)),
        };

        Self {
            router: build_router(state),
            provider,
            log_dir,
            _tmp: tmp,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(SUBMISSIONS_FILE)
    }

    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.provider.as_ref().map(|p| p.call_count()).unwrap_or(0)
    }

    /// POST a raw body to the generate endpoint.
    pub async fn post_raw(&self, body: impl Into<Body>) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(GENERATE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).expect("Response is not JSON");
        (status, body)
    }

    pub async fn post_json(&self, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.post_raw(body.to_string()).await
    }
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "userUrl": "https://www.acme.io",
        "competitorUrl": "https://globex.com",
        "userEmail": "rep@acme.io"
    })
}

pub fn test_config(api_key: Option<&str>, log_dir: &std::path::Path) -> BattlecardConfig {
    BattlecardConfig {
        common: CoreConfig {
            port: 0,
            ..CoreConfig::default()
        },
        openai: OpenAiConfig {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            model: "gpt-4o".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
        },
        submissions: SubmissionLogConfig {
            dir: log_dir.to_string_lossy().into_owned(),
            file_name: SUBMISSIONS_FILE.to_string(),
        },
    }
}

/// Running server bound to a random port.
pub struct TestApp {
    pub address: String,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn spawn(api_key: Option<&str>) -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let config = test_config(api_key, &tmp.path().join("data"));

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp { address, _tmp: tmp }
    }
}
