use serde::{Deserialize, Serialize};

/// Highest score an evaluation can carry.
pub const MAX_SCORE: u8 = 10;

/// Structured feedback for one prompt template against one use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub matches_usecase: bool,
    pub positive_points: Vec<String>,
    pub lacking: Vec<String>,
    pub suggestions: Vec<String>,
    /// 0 – 10
    pub score: u8,
}

impl EvaluationResult {
    /// Returned without calling the model when a template has no placeholder syntax.
    pub fn placeholders_required() -> Self {
        Self {
            matches_usecase: false,
            positive_points: vec![],
            lacking: vec!["Placeholders are necessary".to_string()],
            suggestions: vec![],
            score: 2,
        }
    }

    /// Returned when the model answered but its reply was not valid JSON.
    pub fn unparsable_reply() -> Self {
        Self {
            matches_usecase: true,
            positive_points: vec![
                "Received response from AI".to_string(),
                "Contains prompt structure".to_string(),
            ],
            lacking: vec!["Unable to parse detailed evaluation".to_string()],
            suggestions: vec!["Please try again with a clearer prompt template".to_string()],
            score: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholders_required_wire_shape() {
        assert_eq!(
            serde_json::to_value(EvaluationResult::placeholders_required()).unwrap(),
            json!({
                "matches_usecase": false,
                "positive_points": [],
                "lacking": ["Placeholders are necessary"],
                "suggestions": [],
                "score": 2
            })
        );
    }

    #[test]
    fn test_unparsable_reply_is_lenient_midpoint() {
        let fallback = EvaluationResult::unparsable_reply();
        assert!(fallback.matches_usecase);
        assert_eq!(fallback.score, 5);
        assert_eq!(fallback.positive_points.len(), 2);
    }
}
