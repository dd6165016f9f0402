pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    generate_article_handler, health_handler, list_reports_handler, rank_topics_handler,
    score_handler,
};
pub use state::AppState;

/// Builds the API router over the shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/quality/score", post(score_handler))
        .route("/topics/rank", post(rank_topics_handler))
        .route("/articles/generate", post(generate_article_handler))
        .route("/reports", get(list_reports_handler))
        .with_state(app_state)
}
