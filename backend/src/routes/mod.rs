//! Route definitions for the Garden Self-Sufficiency Planner

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/crops", crop_routes())
        .nest("/plans", plan_routes())
}

/// Crop catalog routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/default", get(handlers::get_default_crops))
        .route("/suggest", post(handlers::suggest_crops))
}

/// Plan routes
fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::save_plan))
        .route("/generate", post(handlers::generate_plan))
        .route("/recalculate", post(handlers::recalculate_plan))
        .route("/:plan_id", get(handlers::get_plan))
        .route("/:plan_id/calendar", get(handlers::export_plan_calendar))
}
