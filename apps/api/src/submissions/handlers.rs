use std::collections::HashSet;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::submission::SubmissionRow;
use crate::state::AppState;

/// Admin view looks this far back unless the caller asks otherwise.
pub const DEFAULT_ADMIN_WINDOW_HOURS: u32 = 10;

/// One year; wider windows are rejected before any date arithmetic.
pub const MAX_ADMIN_WINDOW_HOURS: u32 = 24 * 365;

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct AdminQuery {
    pub window_hours: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct AdminSummary {
    pub window_hours: u32,
    pub unique_users: usize,
    pub submissions: Vec<SubmissionRow>,
}

/// GET /api/v1/submissions?user_id=
pub async fn handle_submission_history(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<Vec<SubmissionRow>>, AppError> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let history = state.store.submissions_for_user(params.user_id).await?;
    Ok(Json(history))
}

/// GET /api/v1/admin/submissions
pub async fn handle_admin_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<AdminQuery>, QueryRejection>,
) -> Result<Json<AdminSummary>, AppError> {
    if let Some(expected) = state.config.admin_token.as_deref() {
        let presented = headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if !presented.is_some_and(|token| tokens_match(token, expected)) {
            return Err(AppError::Unauthorized);
        }
    }

    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let window_hours = params.window_hours.unwrap_or(DEFAULT_ADMIN_WINDOW_HOURS);
    if window_hours == 0 {
        return Err(AppError::Validation(
            "window_hours must be at least 1".to_string(),
        ));
    }

    if window_hours > MAX_ADMIN_WINDOW_HOURS {
        return Err(AppError::Validation(format!(
            "window_hours must be at most {MAX_ADMIN_WINDOW_HOURS}"
        )));
    }

    let since = Utc::now()
        .checked_sub_signed(Duration::hours(i64::from(window_hours)))
        .ok_or_else(|| AppError::Validation("window_hours out of range".to_string()))?;
    let submissions = state.store.submissions_since(since).await?;

    Ok(Json(AdminSummary {
        window_hours,
        unique_users: count_unique_users(&submissions),
        submissions,
    }))
}

fn count_unique_users(rows: &[SubmissionRow]) -> usize {
    rows.iter().map(|r| r.user_id).collect::<HashSet<_>>().len()
}

/// Compares every byte regardless of where the first mismatch is.
/// Only the length difference short-circuits.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match_requires_identical_bytes() {
        assert!(tokens_match("workshop-secret", "workshop-secret"));
        assert!(!tokens_match("workshop-secreT", "workshop-secret"));
        assert!(!tokens_match("Workshop-secret", "workshop-secret"));
    }

    #[test]
    fn test_tokens_match_rejects_prefixes_and_empty() {
        assert!(!tokens_match("workshop", "workshop-secret"));
        assert!(!tokens_match("workshop-secret-2", "workshop-secret"));
        assert!(!tokens_match("", "workshop-secret"));
    }
}
