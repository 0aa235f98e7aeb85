use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::submission::SubmissionRow;
use crate::models::usecase::UseCaseRow;
use crate::submissions::store::{NewSubmission, NewUseCaseRecord, WorkshopStore};

/// `WorkshopStore` backed by the `usecases` and `prompt_submissions` tables.
#[derive(Clone)]
pub struct PgWorkshopStore {
    pool: PgPool,
}

impl PgWorkshopStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkshopStore for PgWorkshopStore {
    async fn record_use_cases(&self, record: NewUseCaseRecord) -> Result<UseCaseRow, AppError> {
        let row = sqlx::query_as::<_, UseCaseRow>(
            r#"
            INSERT INTO usecases (user_id, department, task, generated_usecases)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(record.user_id)
        .bind(&record.department)
        .bind(&record.task)
        .bind(&record.usecases)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn record_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionRow, AppError> {
        let evaluation = serde_json::to_value(&submission.evaluation)
            .context("serializing evaluation for storage")?;

        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            INSERT INTO prompt_submissions (user_id, usecase, prompt_template, evaluation, score)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(submission.user_id)
        .bind(&submission.usecase)
        .bind(&submission.prompt_template)
        .bind(evaluation)
        .bind(i32::from(submission.evaluation.score))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn submissions_for_user(&self, user_id: Uuid) -> Result<Vec<SubmissionRow>, AppError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            "SELECT * FROM prompt_submissions WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn submissions_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SubmissionRow>, AppError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT * FROM prompt_submissions
            WHERE created_at >= $1
            ORDER BY score DESC, created_at ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
