// Use-case generation: department + task → up to four candidate use cases.
// All LLM calls go through llm_client; nothing here talks to the API directly.

pub mod extractor;
pub mod handlers;
pub mod prompts;
