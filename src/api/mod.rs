//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recipes", get(recipes_handler))
        // Recipe brew timer
        .route("/brew", get(brew_status_handler))
        .route("/brew/attach/:recipe_id", post(attach_handler))
        .route("/brew/start", post(brew_start_handler))
        .route("/brew/pause", post(brew_pause_handler))
        .route("/brew/next", post(brew_next_handler))
        .route("/brew/prev", post(brew_prev_handler))
        .route("/brew/jump/:index", post(brew_jump_handler))
        .route("/brew/reset-step", post(brew_reset_step_handler))
        .route("/brew/reset", post(brew_reset_handler))
        // Standalone knob timer
        .route("/knob", get(knob_status_handler))
        .route("/knob/configure", post(knob_configure_handler))
        .route("/knob/start", post(knob_start_handler))
        .route("/knob/pause", post(knob_pause_handler))
        .route("/knob/reset", post(knob_reset_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
