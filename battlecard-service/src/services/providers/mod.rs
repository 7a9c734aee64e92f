//! Completion provider abstractions and implementations.
//!
//! The handler depends on the [`CompletionProvider`] trait only, so the
//! OpenAI backend can be swapped for the mock in tests.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The API answered with an error. `status` is the upstream HTTP status.
    #[error("API error (status {status:?}): {message}")]
    Api { status: Option<u16>, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One chat completion: a system instruction and a single user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
}

/// Result of a provider call.
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    /// Text content of the first choice, if any.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: u32,

    /// Output tokens generated.
    pub output_tokens: u32,

    /// Finish reason as reported by the API.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinishReason {
    #[default]
    Complete,
    Length,
    ContentFilter,
    Other,
}

impl FinishReason {
    pub fn from_api(reason: Option<&str>) -> Self {
        match reason {
            None | Some("stop") => FinishReason::Complete,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(_) => FinishReason::Other,
        }
    }
}

/// Trait for chat completion backends (e.g., OpenAI).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion. The call is awaited to completion and never retried.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;
}
