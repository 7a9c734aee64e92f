use crate::dtos::{GenerateBattlecardRequest, GenerateBattlecardResponse};
use crate::models::Submission;
use crate::services::BattlecardError;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};
use service_core::error::AppError;

pub const SUCCESS_MESSAGE: &str = "Battlecard generated successfully.";

/// `POST /api/generate-battlecard`
///
/// The body is parsed by hand so that every malformed payload, including a
/// missing content type, is answered with the same 400 JSON error.
pub async fn generate_battlecard(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateBattlecardResponse>, AppError> {
    let generator = state
        .generator
        .as_ref()
        .ok_or(BattlecardError::ClientNotInitialized)?;

    let request = GenerateBattlecardRequest::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected battlecard request");
        BattlecardError::InvalidInput(e.to_string())
    })?;

    state
        .submissions
        .append(&Submission::new(
            request.user_url.as_str(),
            request.competitor_url.as_str(),
            request.user_email.as_str(),
        ))
        .await;

    let battlecard = generator.generate(&request).await?;

    Ok(Json(GenerateBattlecardResponse {
        message: SUCCESS_MESSAGE.to_string(),
        battlecard,
    }))
}
