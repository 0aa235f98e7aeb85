// Prompt-template evaluation: placeholder gate → LLM scoring → response validation.
// All LLM calls go through llm_client; nothing here talks to the API directly.

pub mod gate;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validator;
