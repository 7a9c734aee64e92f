//! OpenAI chat completions provider.

use super::{
    CompletionProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderError,
};
use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// OpenAI provider. Holds one pooled HTTP client for the life of the process.
pub struct OpenAiProvider {
    api_key: Secret<String>,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: Secret<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            api_key,
            base_url,
            client: Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
        };

        tracing::debug!(
            model = %request.model,
            prompt_len = request.user.len(),
            "Sending request to OpenAI chat completions API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    if error_text.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("Unknown error")
                            .to_string()
                    } else {
                        error_text
                    }
                });

            tracing::warn!(status = %status, error = %message, "OpenAI API returned an error");

            return Err(ProviderError::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let choice = api_response.choices.into_iter().next();
        let finish_reason =
            FinishReason::from_api(choice.as_ref().and_then(|c| c.finish_reason.as_deref()));
        let text = choice.and_then(|c| c.message.content);
        let usage = api_response.usage.unwrap_or_default();

        Ok(CompletionResponse {
            text,
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            finish_reason,
        })
    }
}

// ============================================================================
// OpenAI API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o".to_string(),
            system: "You are a strategist.".to_string(),
            user: "Compare Acme and Globex".to_string(),
        }
    }

    fn provider(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(Secret::new("sk-test".to_string()), format!("{}/", server.uri()))
    }

    #[tokio::test]
    async fn sends_system_and_user_messages_and_reads_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "You are a strategist." },
                    { "role": "user", "content": "Compare Acme and Globex" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "<h2>Battlecard</h2>" },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = provider(&server).complete(&request()).await.unwrap();

        assert_eq!(response.text.as_deref(), Some("<h2>Battlecard</h2>"));
        assert_eq!(response.input_tokens, 120);
        assert_eq!(response.output_tokens, 40);
        assert_eq!(response.finish_reason, FinishReason::Complete);
    }

    #[tokio::test]
    async fn null_content_and_missing_choices_yield_no_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": null }, "finish_reason": "length" }]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let provider = provider(&server);

        let first = provider.complete(&request()).await.unwrap();
        assert!(first.text.is_none());
        assert_eq!(first.finish_reason, FinishReason::Length);

        let second = provider.complete(&request()).await.unwrap();
        assert!(second.text.is_none());
    }

    #[tokio::test]
    async fn api_errors_carry_status_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded" }
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();

        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, Some(429));
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_used_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream gateway failure"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Api { status: Some(502), ref message } if message == "upstream gateway failure"
        ));
    }

    #[tokio::test]
    async fn malformed_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let provider = OpenAiProvider::new(Secret::new("sk-test".to_string()), "http://127.0.0.1:1");
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError(_)));
    }
}
