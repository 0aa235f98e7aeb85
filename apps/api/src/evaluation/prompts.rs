// All LLM prompt constants for prompt-template evaluation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::CompletionSettings;

pub const EVALUATION_SETTINGS: CompletionSettings = CompletionSettings {
    model: "gpt-4.1-2025-04-14",
    max_tokens: 1000,
    temperature: 0.3,
};

const EVALUATION_SYSTEM_BODY: &str = r#"You are an expert prompt engineering evaluator. Analyze the given prompt template against the specified use case and provide structured feedback.

IMPORTANT: Be lenient with use case matching. If the prompt template and use case are even loosely related, treat it as a match (matches_usecase: true). Only mark a mismatch when they are completely unrelated or contradictory.

Return an object with this EXACT schema:
{
  "matches_usecase": boolean,
  "positive_points": ["point1", "point2"],
  "lacking": ["issue1", "issue2"],
  "suggestions": ["suggestion1", "suggestion2"],
  "score": integer from 0 to 10
}

Evaluate based on:
1. Relevance to the use case (be generous with matching)
2. Clarity and specificity
3. Completeness of instructions
4. Use of placeholders for the values that change between runs
5. Professional structure

Give positive points, gaps AND suggestions even when the match is imperfect, as long as the template relates to the use case."#;

/// Full system prompt: evaluation rubric followed by the JSON-only rule.
pub fn evaluation_system() -> String {
    format!("{EVALUATION_SYSTEM_BODY}\n\n{JSON_ONLY_INSTRUCTION}")
}

/// User prompt template. Replace `{usecase}` and `{prompt}` before sending.
pub const EVALUATION_PROMPT_TEMPLATE: &str = "Use Case: {usecase}\n\nPrompt Template: {prompt}\n\n\
    Evaluate this prompt template against the use case and return feedback in the specified \
    JSON format. Be lenient with matching: if there is any reasonable connection, consider it a match.";

pub fn build_evaluation_prompt(usecase: &str, prompt: &str) -> String {
    // Fill `{usecase}` last so braces inside the user's template are never re-expanded.
    EVALUATION_PROMPT_TEMPLATE
        .replacen("{prompt}", prompt, 1)
        .replacen("{usecase}", usecase, 1)
}
