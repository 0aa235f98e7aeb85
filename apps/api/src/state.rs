use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::submissions::store::WorkshopStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable persistence. Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn WorkshopStore>,
    pub config: Config,
}
