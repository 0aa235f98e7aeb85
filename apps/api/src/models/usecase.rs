use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UseCaseRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub department: String,
    pub task: String,
    pub generated_usecases: Vec<String>,
    pub created_at: DateTime<Utc>,
}
