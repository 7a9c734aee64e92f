//! Application startup and lifecycle management.

use crate::config::BattlecardConfig;
use crate::handlers;
use crate::services::providers::openai::OpenAiProvider;
use crate::services::providers::CompletionProvider;
use crate::services::{BattlecardGenerator, CsvSubmissionLog, SubmissionLog};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// `generator` is `None` when no API key was configured; generation requests
/// then fail with a fixed 500 instead of the process refusing to start.
#[derive(Clone)]
pub struct AppState {
    pub generator: Option<BattlecardGenerator>,
    pub submissions: Arc<dyn SubmissionLog>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route(
            "/api/generate-battlecard",
            post(handlers::generate_battlecard),
        )
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Build the state from configuration. Never fails: a missing credential is
/// logged and turned into degraded mode.
pub fn build_state(config: &BattlecardConfig) -> AppState {
    let generator = match &config.openai.api_key {
        Some(api_key) => {
            let provider: Arc<dyn CompletionProvider> =
                Arc::new(OpenAiProvider::new(api_key.clone(), &config.openai.base_url));
            tracing::info!(
                model = %config.openai.model,
                base_url = %config.openai.base_url,
                "Initialized OpenAI completion provider"
            );
            Some(BattlecardGenerator::new(provider, &config.openai.model))
        }
        None => {
            tracing::error!(
                "Failed to initialize OpenAI client: OPENAI_API_KEY environment variable is not set"
            );
            None
        }
    };

    let submissions = CsvSubmissionLog::new(&config.submissions.dir, &config.submissions.file_name);
    tracing::info!(path = %submissions.path().display(), "Submission log configured");

    AppState {
        generator,
        submissions: Arc::new(submissions),
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: BattlecardConfig) -> Result<Self, AppError> {
        let state = build_state(&config);
        Self::with_state(config, state).await
    }

    /// Build the application around an existing state.
    pub async fn with_state(config: BattlecardConfig, state: AppState) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Battlecard service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
