//! Axum route handlers for prompt-template evaluation.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::gate::has_placeholders;
use crate::evaluation::models::EvaluationResult;
use crate::evaluation::prompts::{build_evaluation_prompt, evaluation_system, EVALUATION_SETTINGS};
use crate::evaluation::validator::validate_evaluation;
use crate::state::AppState;
use crate::submissions::store::NewSubmission;

#[derive(Debug, Deserialize)]
pub struct EvaluatePromptRequest {
    #[serde(default)]
    pub usecase: String,
    #[serde(default)]
    pub prompt: String,
    /// Opaque identity of the caller. When present, the submission is recorded.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// POST /api/v1/prompts/evaluate
///
/// Always answers 200 with an `EvaluationResult` unless the model call itself fails.
/// Templates without placeholder syntax are scored locally and never reach the model.
pub async fn handle_evaluate_prompt(
    State(state): State<AppState>,
    payload: Result<Json<EvaluatePromptRequest>, JsonRejection>,
) -> Result<Json<EvaluationResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let usecase = request.usecase.trim();
    let prompt = request.prompt.trim();
    if usecase.is_empty() {
        return Err(AppError::Validation("usecase cannot be empty".to_string()));
    }
    if prompt.is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let evaluation = if has_placeholders(prompt) {
        let raw = state
            .llm
            .complete(
                &evaluation_system(),
                &build_evaluation_prompt(usecase, prompt),
                &EVALUATION_SETTINGS,
            )
            .await?;
        validate_evaluation(&raw)
    } else {
        info!("Prompt template has no placeholders; skipping model evaluation");
        EvaluationResult::placeholders_required()
    };

    if let Some(user_id) = request.user_id {
        let submission = NewSubmission {
            user_id,
            usecase: usecase.to_string(),
            prompt_template: prompt.to_string(),
            evaluation: evaluation.clone(),
        };
        if let Err(e) = state.store.record_submission(submission).await {
            error!(%user_id, "Failed to record prompt submission: {e}");
        }
    }

    Ok(Json(evaluation))
}
