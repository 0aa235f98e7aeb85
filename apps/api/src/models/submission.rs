use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One evaluated prompt template, as stored in `prompt_submissions`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub usecase: String,
    pub prompt_template: String,
    /// The `EvaluationResult` returned to the user, kept verbatim.
    pub evaluation: Value,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}
