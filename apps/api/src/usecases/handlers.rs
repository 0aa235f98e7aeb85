//! Axum route handlers for use-case generation.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::submissions::store::NewUseCaseRecord;
use crate::usecases::extractor::extract_use_cases;
use crate::usecases::prompts::{build_usecase_prompt, GENERATION_SETTINGS, USECASE_SYSTEM};

#[derive(Debug, Deserialize)]
pub struct GenerateUseCasesRequest {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub task: String,
    /// Opaque identity of the caller. When present, the result is recorded.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GenerateUseCasesResponse {
    pub usecases: Vec<String>,
}

/// POST /api/v1/usecases/generate
///
/// Asks the model for four use cases and returns whatever survives extraction (0–4).
pub async fn handle_generate_usecases(
    State(state): State<AppState>,
    payload: Result<Json<GenerateUseCasesRequest>, JsonRejection>,
) -> Result<Json<GenerateUseCasesResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let department = request.department.trim();
    let task = request.task.trim();
    if department.is_empty() {
        return Err(AppError::Validation("department cannot be empty".to_string()));
    }
    if task.is_empty() {
        return Err(AppError::Validation("task cannot be empty".to_string()));
    }

    let raw = state
        .llm
        .complete(
            USECASE_SYSTEM,
            &build_usecase_prompt(department, task),
            &GENERATION_SETTINGS,
        )
        .await?;

    let usecases = extract_use_cases(&raw);
    info!(
        department,
        count = usecases.len(),
        "Extracted use cases from model reply"
    );

    if let Some(user_id) = request.user_id {
        let record = NewUseCaseRecord {
            user_id,
            department: department.to_string(),
            task: task.to_string(),
            usecases: usecases.clone(),
        };
        if let Err(e) = state.store.record_use_cases(record).await {
            error!(%user_id, "Failed to record generated use cases: {e}");
        }
    }

    Ok(Json(GenerateUseCasesResponse { usecases }))
}
