use super::providers::ProviderError;
use axum::http::StatusCode;
use service_core::error::AppError;
use thiserror::Error;

pub const CLIENT_NOT_INITIALIZED_MESSAGE: &str =
    "OpenAI client not initialized. Check server logs and environment variables.";
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input data types.";
pub const GENERATION_FAILED_MESSAGE: &str = "An internal server error occurred during generation.";

#[derive(Error, Debug)]
pub enum BattlecardError {
    /// The completion client could not be built at startup.
    #[error("Completion client not initialized")]
    ClientNotInitialized,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream API error (status {status:?}): {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("Completion returned no content")]
    EmptyCompletion,

    #[error("Generation failed: {0}")]
    Generation(String),
}

impl From<ProviderError> for BattlecardError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api { status, message } => BattlecardError::Upstream { status, message },
            ProviderError::NetworkError(e) | ProviderError::InvalidResponse(e) => {
                BattlecardError::Generation(e)
            }
        }
    }
}

impl From<BattlecardError> for AppError {
    fn from(err: BattlecardError) -> Self {
        match err {
            BattlecardError::ClientNotInitialized => {
                AppError::InternalError(anyhow::anyhow!(CLIENT_NOT_INITIALIZED_MESSAGE))
            }
            BattlecardError::InvalidInput(_) => {
                AppError::BadRequest(anyhow::anyhow!(INVALID_INPUT_MESSAGE))
            }
            BattlecardError::Upstream { status, message } => AppError::Upstream {
                status: upstream_status(status),
                message: match status {
                    Some(code) => format!("OpenAI API Error: {} {}", code, message),
                    None => format!("OpenAI API Error: {}", message),
                },
            },
            BattlecardError::EmptyCompletion | BattlecardError::Generation(_) => {
                AppError::InternalError(anyhow::anyhow!(GENERATION_FAILED_MESSAGE))
            }
        }
    }
}

/// Forward the upstream status when it is an error status, 500 otherwise.
fn upstream_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|code| code.is_client_error() || code.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
