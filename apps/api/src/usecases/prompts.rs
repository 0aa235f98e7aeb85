// All LLM prompt constants for use-case generation.

use crate::llm_client::CompletionSettings;

pub const GENERATION_SETTINGS: CompletionSettings = CompletionSettings {
    model: "gpt-4",
    max_tokens: 800,
    temperature: 0.7,
};

pub const USECASE_SYSTEM: &str =
    "You are an AI assistant helping workshop attendees practise writing prompt templates. \
    Given a department and a task, generate exactly 4 use cases. \
    Each use case must be atomic (one task an AI model can complete in a single prompt), \
    practical, and specific enough to be worth turning into a reusable prompt template. \
    Answer with a numbered list only, formatted as \"1. ...\" through \"4. ...\", \
    one use case per line, with no introduction or closing remarks.";

/// User prompt template. Replace `{department}` and `{task}` before sending.
pub const USECASE_PROMPT_TEMPLATE: &str = "Department: {department}\nTask: {task}\n\n\
    Generate exactly 4 specific use cases for prompt templates that would be useful \
    for this department and task. Make each use case practical and actionable.";

pub fn build_usecase_prompt(department: &str, task: &str) -> String {
    // `{department}` precedes `{task}`, so filling it last never touches user text.
    USECASE_PROMPT_TEMPLATE
        .replacen("{task}", task, 1)
        .replacen("{department}", department, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_usecase_prompt_fills_both_slots() {
        let prompt = build_usecase_prompt("Accounting", "invoice review");
        assert!(prompt.starts_with("Department: Accounting\nTask: invoice review\n"));
        assert!(!prompt.contains("{department}"));
        assert!(!prompt.contains("{task}"));
    }
}
