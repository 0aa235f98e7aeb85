//! Placeholder gate: decides whether a prompt template is worth a model call.
//!
//! Workshop attendees are taught to mark substitutable values with brackets,
//! angle brackets or braces. A template with none of them is answered locally
//! with `EvaluationResult::placeholders_required()`.

const PLACEHOLDER_CHARS: [char; 6] = ['[', ']', '<', '>', '{', '}'];

/// True when the template contains at least one placeholder delimiter.
pub fn has_placeholders(prompt: &str) -> bool {
    prompt.chars().any(|c| PLACEHOLDER_CHARS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prose_has_no_placeholders() {
        assert!(!has_placeholders("Write a welcome email for a new hire."));
        assert!(!has_placeholders(""));
        assert!(!has_placeholders("Use (parentheses) and \"quotes\" only"));
    }

    #[test]
    fn test_each_delimiter_counts_on_its_own() {
        for c in PLACEHOLDER_CHARS {
            let prompt = format!("Summarize the report {c} please");
            assert!(has_placeholders(&prompt), "{c} should count as a placeholder");
        }
    }

    #[test]
    fn test_common_placeholder_styles() {
        assert!(has_placeholders("Write a welcome email for {{name}}."));
        assert!(has_placeholders("Write a welcome email for {name}."));
        assert!(has_placeholders("Write a welcome email for [NAME]."));
        assert!(has_placeholders("Write a welcome email for <name>."));
    }
}
