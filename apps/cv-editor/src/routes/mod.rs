pub mod cv;
pub mod health;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/cv",
            get(cv::handle_get_cv).put(cv::handle_save_cv),
        )
        .route("/api/v1/cv/profile", get(cv::handle_get_profile))
        .with_state(state)
}
