//! In-process `WorkshopStore`, used when no database is configured and in tests.

use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::submission::SubmissionRow;
use crate::models::usecase::UseCaseRow;
use crate::submissions::store::{NewSubmission, NewUseCaseRecord, WorkshopStore};

#[derive(Debug, Default)]
pub struct MemoryWorkshopStore {
    usecases: Mutex<Vec<UseCaseRow>>,
    submissions: Mutex<Vec<SubmissionRow>>,
}

impl MemoryWorkshopStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every use-case batch recorded so far, in insertion order.
    #[cfg(test)]
    pub fn usecase_rows(&self) -> Vec<UseCaseRow> {
        self.usecases.lock().unwrap().clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::Internal(anyhow!("in-memory store lock poisoned")))
}

#[async_trait]
impl WorkshopStore for MemoryWorkshopStore {
    async fn record_use_cases(&self, record: NewUseCaseRecord) -> Result<UseCaseRow, AppError> {
        let row = UseCaseRow {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            department: record.department,
            task: record.task,
            generated_usecases: record.usecases,
            created_at: Utc::now(),
        };
        lock(&self.usecases)?.push(row.clone());
        Ok(row)
    }

    async fn record_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionRow, AppError> {
        let row = SubmissionRow {
            id: Uuid::new_v4(),
            user_id: submission.user_id,
            usecase: submission.usecase,
            prompt_template: submission.prompt_template,
            score: i32::from(submission.evaluation.score),
            evaluation: serde_json::to_value(&submission.evaluation)
                .map_err(|e| AppError::Internal(e.into()))?,
            created_at: Utc::now(),
        };
        lock(&self.submissions)?.push(row.clone());
        Ok(row)
    }

    async fn submissions_for_user(&self, user_id: Uuid) -> Result<Vec<SubmissionRow>, AppError> {
        // Reverse insertion order first so equal timestamps still list newest first.
        let mut rows: Vec<SubmissionRow> = lock(&self.submissions)?
            .iter()
            .rev()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn submissions_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SubmissionRow>, AppError> {
        let mut rows: Vec<SubmissionRow> = lock(&self.submissions)?
            .iter()
            .filter(|row| row.created_at >= since)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::evaluation::models::EvaluationResult;

    fn submission(user_id: Uuid, usecase: &str, score: u8) -> NewSubmission {
        NewSubmission {
            user_id,
            usecase: usecase.to_string(),
            prompt_template: format!("Help with {usecase} for [team]"),
            evaluation: EvaluationResult {
                score,
                ..EvaluationResult::unparsable_reply()
            },
        }
    }

    #[tokio::test]
    async fn test_history_is_per_user_and_newest_first() {
        let store = MemoryWorkshopStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.record_submission(submission(alice, "first", 4)).await.unwrap();
        store.record_submission(submission(bob, "other", 9)).await.unwrap();
        store.record_submission(submission(alice, "second", 6)).await.unwrap();

        let history = store.submissions_for_user(alice).await.unwrap();
        let usecases: Vec<&str> = history.iter().map(|r| r.usecase.as_str()).collect();
        assert_eq!(usecases, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_recent_submissions_ordered_by_score_then_age() {
        let store = MemoryWorkshopStore::new();
        let user = Uuid::new_v4();

        store.record_submission(submission(user, "a", 6)).await.unwrap();
        store.record_submission(submission(user, "b", 9)).await.unwrap();
        store.record_submission(submission(user, "c", 6)).await.unwrap();

        let since = Utc::now() - Duration::hours(10);
        let recent = store.submissions_since(since).await.unwrap();
        let usecases: Vec<&str> = recent.iter().map(|r| r.usecase.as_str()).collect();
        assert_eq!(usecases, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_recent_submissions_exclude_older_rows() {
        let store = MemoryWorkshopStore::new();
        store
            .record_submission(submission(Uuid::new_v4(), "old", 8))
            .await
            .unwrap();

        let future = Utc::now() + Duration::minutes(1);
        assert!(store.submissions_since(future).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_keeps_evaluation_and_score() {
        let store = MemoryWorkshopStore::new();
        let row = store
            .record_submission(submission(Uuid::new_v4(), "emails", 7))
            .await
            .unwrap();
        assert_eq!(row.score, 7);
        assert_eq!(row.evaluation["score"], 7);
        assert_eq!(row.evaluation["matches_usecase"], true);
    }
}
