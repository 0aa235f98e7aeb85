//! Storage trait for generated use cases and prompt submissions.
//!
//! Carried in `AppState` as `Arc<dyn WorkshopStore>`:
//! `PgWorkshopStore` when a database is configured, `MemoryWorkshopStore` otherwise.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::models::EvaluationResult;
use crate::models::submission::SubmissionRow;
use crate::models::usecase::UseCaseRow;

/// A batch of use cases generated for one user's department/task pair.
#[derive(Debug, Clone)]
pub struct NewUseCaseRecord {
    pub user_id: Uuid,
    pub department: String,
    pub task: String,
    pub usecases: Vec<String>,
}

/// An evaluated prompt template ready to be stored.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: Uuid,
    pub usecase: String,
    pub prompt_template: String,
    pub evaluation: EvaluationResult,
}

#[async_trait]
pub trait WorkshopStore: Send + Sync {
    async fn record_use_cases(&self, record: NewUseCaseRecord) -> Result<UseCaseRow, AppError>;

    async fn record_submission(&self, submission: NewSubmission)
        -> Result<SubmissionRow, AppError>;

    /// All submissions owned by `user_id`, newest first.
    async fn submissions_for_user(&self, user_id: Uuid) -> Result<Vec<SubmissionRow>, AppError>;

    /// Submissions created at or after `since`, best score first, then oldest first.
    async fn submissions_since(&self, since: DateTime<Utc>)
        -> Result<Vec<SubmissionRow>, AppError>;
}
