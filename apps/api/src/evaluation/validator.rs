//! Normalizes the model's evaluation reply into an `EvaluationResult`.
//!
//! The reply is free text that should hold a JSON object. Field-level problems are
//! repaired with defaults; a reply that is not JSON at all gets the fixed
//! `EvaluationResult::unparsable_reply()`. Nothing here returns an error.

use serde_json::Value;
use tracing::warn;

use crate::evaluation::models::{EvaluationResult, MAX_SCORE};
use crate::llm_client::strip_json_fences;

/// Parses and normalizes raw model output.
pub fn validate_evaluation(raw: &str) -> EvaluationResult {
    match serde_json::from_str::<Value>(strip_json_fences(raw)) {
        Ok(value) => normalize_evaluation(&value),
        Err(e) => {
            warn!("Evaluation reply was not valid JSON ({e}); using fallback evaluation");
            EvaluationResult::unparsable_reply()
        }
    }
}

/// Applies field defaults to a parsed reply. Non-object values behave like `{}`.
pub fn normalize_evaluation(value: &Value) -> EvaluationResult {
    EvaluationResult {
        // Lenient matching: only an explicit `false` counts as a mismatch.
        matches_usecase: !matches!(value.get("matches_usecase"), Some(Value::Bool(false))),
        positive_points: string_list(value.get("positive_points")),
        lacking: string_list(value.get("lacking")),
        suggestions: string_list(value.get("suggestions")),
        score: coerce_score(value.get("score")),
    }
}

/// An array of strings, or empty if the field is missing or holds anything else.
fn string_list(field: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = field else {
        return vec![];
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

/// Integer score in `0..=MAX_SCORE`; 0 when missing or non-numeric.
fn coerce_score(field: Option<&Value>) -> u8 {
    let raw = match field {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(score) if score.is_finite() => score.round().clamp(0.0, f64::from(MAX_SCORE)) as u8,
        _ => 0,
    }
}
