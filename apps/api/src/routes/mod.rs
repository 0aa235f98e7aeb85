pub mod health;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::errors::AppError;
use crate::evaluation::handlers::handle_evaluate_prompt;
use crate::state::AppState;
use crate::submissions::handlers::{handle_admin_summary, handle_submission_history};
use crate::usecases::handlers::handle_generate_usecases;

async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

/// Browser callers send these on every request; preflights must allow them.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/usecases/generate", post(handle_generate_usecases))
        .route("/api/v1/prompts/evaluate", post(handle_evaluate_prompt))
        .route("/api/v1/submissions", get(handle_submission_history))
        .route("/api/v1/admin/submissions", get(handle_admin_summary))
        // Function-style paths used by the workshop front end
        .route(
            "/functions/v1/generate-usecases",
            post(handle_generate_usecases),
        )
        .route("/functions/v1/evaluate-prompt", post(handle_evaluate_prompt))
        .fallback(not_found)
        .with_state(state)
        .layer(cors_layer())
}
