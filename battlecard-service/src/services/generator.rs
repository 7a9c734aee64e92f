//! Battlecard generation: name derivation, prompt rendering, the completion
//! call and cleanup of the returned text.

use super::cleanup::{clean_completion, preview};
use super::error::BattlecardError;
use super::naming::company_name_from_url;
use super::prompt::{render_battlecard_prompt, PromptParams, SYSTEM_INSTRUCTION};
use super::providers::{CompletionProvider, CompletionRequest};
use crate::dtos::GenerateBattlecardRequest;
use std::sync::Arc;

const PREVIEW_CHARS: usize = 200;

#[derive(Clone)]
pub struct BattlecardGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl BattlecardGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate the battlecard HTML for one request.
    pub async fn generate(
        &self,
        request: &GenerateBattlecardRequest,
    ) -> Result<String, BattlecardError> {
        let company_a_name = company_name_from_url(&request.user_url);
        let company_b_name = company_name_from_url(&request.competitor_url);

        tracing::info!(
            user_url = %request.user_url,
            competitor_url = %request.competitor_url,
            user_email = %request.user_email,
            company_a_name = %company_a_name,
            company_b_name = %company_b_name,
            "Received battlecard generation request"
        );

        let prompt = render_battlecard_prompt(&PromptParams {
            company_a_name: &company_a_name,
            company_a_url: &request.user_url,
            company_b_name: &company_b_name,
            company_b_url: &request.competitor_url,
        });

        let completion = CompletionRequest {
            model: self.model.clone(),
            system: SYSTEM_INSTRUCTION.to_string(),
            user: prompt,
        };

        let response = self.provider.complete(&completion).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "Completion call failed");
            BattlecardError::from(e)
        })?;

        let battlecard = response
            .text
            .as_deref()
            .map(clean_completion)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                tracing::error!(
                    finish_reason = ?response.finish_reason,
                    "Completion returned no usable content"
                );
                BattlecardError::EmptyCompletion
            })?;

        tracing::info!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            preview = %preview(&battlecard, PREVIEW_CHARS),
            "Battlecard generated"
        );

        Ok(battlecard)
    }
}
