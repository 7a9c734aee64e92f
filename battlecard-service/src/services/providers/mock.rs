//! Mock completion provider for testing.

use super::{
    CompletionProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderError,
};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Outcome {
    Text(String),
    Empty,
    ApiError { status: Option<u16>, message: String },
    NetworkError(String),
}

/// Mock provider with a scripted outcome. Every request is recorded.
pub struct MockCompletionProvider {
    outcome: Outcome,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Text(text.into()))
    }

    /// Succeed without any text content.
    pub fn empty() -> Self {
        Self::with_outcome(Outcome::Empty)
    }

    /// Fail as the upstream API would.
    pub fn api_error(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::ApiError {
            status,
            message: message.into(),
        })
    }

    /// Fail before any response is received.
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::NetworkError(message.into()))
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

/// Rough token estimate of four bytes per token, saturating at `u32::MAX`.
fn approx_tokens(bytes: usize) -> u32 {
    u32::try_from(bytes / 4).unwrap_or(u32::MAX)
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match &self.outcome {
            Outcome::Text(text) => Ok(CompletionResponse {
                text: Some(text.clone()),
                input_tokens: approx_tokens(request.system.len() + request.user.len()),
                output_tokens: approx_tokens(text.len()),
                finish_reason: FinishReason::Complete,
            }),
            Outcome::Empty => Ok(CompletionResponse {
                text: None,
                ..Default::default()
            }),
            Outcome::ApiError { status, message } => Err(ProviderError::Api {
                status: *status,
                message: message.clone(),
            }),
            Outcome::NetworkError(message) => Err(ProviderError::NetworkError(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user: &str) -> CompletionRequest {
        CompletionRequest {
            model: "mock".to_string(),
            system: "system".to_string(),
            user: user.to_string(),
        }
    }

    #[tokio::test]
    async fn records_requests_in_order() {
        let provider = MockCompletionProvider::with_text("hello");

        provider.complete(&request("one")).await.unwrap();
        provider.complete(&request("two")).await.unwrap();

        let users: Vec<String> = provider.requests().into_iter().map(|r| r.user).collect();
        assert_eq!(users, vec!["one", "two"]);
    }

    #[test]
    fn token_estimate_saturates() {
        assert_eq!(approx_tokens(0), 0);
        assert_eq!(approx_tokens(10), 2);
        assert_eq!(approx_tokens(usize::MAX), u32::MAX);
    }

    #[tokio::test]
    async fn scripted_failures() {
        let err = MockCompletionProvider::api_error(Some(401), "bad key")
            .complete(&request("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: Some(401), .. }));

        let empty = MockCompletionProvider::empty()
            .complete(&request("x"))
            .await
            .unwrap();
        assert!(empty.text.is_none());
    }
}
