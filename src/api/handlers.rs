//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use tracing::info;

use crate::state::{AppError, AppState, BrewStatus, KnobStatus};
use super::responses::{ApiResponse, HealthResponse, KnobConfigRequest, RecipeSummary};

type BrewResult = Result<Json<ApiResponse<BrewStatus>>, AppError>;
type KnobResult = Result<Json<ApiResponse<KnobStatus>>, AppError>;

/// Handle GET /recipes - List available recipes
pub async fn recipes_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    let recipes = state.recipes.lock()
        .map_err(|e| AppError::Lock(format!("Failed to lock recipe book: {}", e)))?;
    Ok(Json(recipes.list().iter().map(RecipeSummary::from).collect()))
}

/// Handle POST /brew/attach/:recipe_id - Attach a recipe to the brew timer
pub async fn attach_handler(State(state): State<Arc<AppState>>, Path(recipe_id): Path<String>) -> BrewResult {
    let status = state.attach_recipe(&recipe_id)?;
    info!("Attach endpoint called - recipe {} ready", recipe_id);
    Ok(Json(ApiResponse::ok(format!("Recipe {} attached", recipe_id), status)))
}

/// Handle GET /brew - Current brew timer status
pub async fn brew_status_handler(State(state): State<Arc<AppState>>) -> Result<Json<BrewStatus>, AppError> {
    Ok(Json(state.brew_status()?))
}

/// Handle POST /brew/start - Start or resume the brew
pub async fn brew_start_handler(State(state): State<Arc<AppState>>) -> BrewResult {
    let status = state.brew_start()?;
    info!("Brew started at step {:?} with {}s left", status.active_index, status.remaining_seconds);
    Ok(Json(ApiResponse::ok("Brew running", status)))
}

/// Handle POST /brew/pause - Freeze the current step
pub async fn brew_pause_handler(State(state): State<Arc<AppState>>) -> BrewResult {
    let status = state.brew_pause()?;
    info!("Brew paused with {}s left", status.remaining_seconds);
    Ok(Json(ApiResponse::ok("Brew paused", status)))
}

/// Handle POST /brew/next - Move to the following step
pub async fn brew_next_handler(State(state): State<Arc<AppState>>) -> BrewResult {
    let status = state.brew_next()?;
    Ok(Json(ApiResponse::ok("Moved to next step", status)))
}

/// Handle POST /brew/prev - Move to the preceding step
pub async fn brew_prev_handler(State(state): State<Arc<AppState>>) -> BrewResult {
    let status = state.brew_prev()?;
    Ok(Json(ApiResponse::ok("Moved to previous step", status)))
}

/// Handle POST /brew/jump/:index - Move to an arbitrary step
pub async fn brew_jump_handler(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> BrewResult {
    let status = state.brew_jump(index)?;
    Ok(Json(ApiResponse::ok(format!("Moved to step {}", index + 1), status)))
}

/// Handle POST /brew/reset-step - Stop and rewind the current step
pub async fn brew_reset_step_handler(State(state): State<Arc<AppState>>) -> BrewResult {
    let status = state.brew_reset_step()?;
    Ok(Json(ApiResponse::ok("Step reset", status)))
}

/// Handle POST /brew/reset - Rewind the whole recipe
pub async fn brew_reset_handler(State(state): State<Arc<AppState>>) -> BrewResult {
    let status = state.brew_reset()?;
    info!("Brew reset to the first step");
    Ok(Json(ApiResponse::ok("Brew reset", status)))
}

/// Handle GET /knob - Current knob timer status
pub async fn knob_status_handler(State(state): State<Arc<AppState>>) -> Result<Json<KnobStatus>, AppError> {
    Ok(Json(state.knob_status()?))
}

/// Handle POST /knob/configure - Set minutes and seconds while unlocked
pub async fn knob_configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KnobConfigRequest>,
) -> KnobResult {
    let status = state.knob_configure(request.minutes, request.seconds)?;
    Ok(Json(ApiResponse::ok(format!("Knob set to {}", status.remaining_display), status)))
}

/// Handle POST /knob/start - Start or resume the knob timer
pub async fn knob_start_handler(State(state): State<Arc<AppState>>) -> KnobResult {
    let status = state.knob_start()?;
    info!("Knob timer running with {}s left", status.remaining_seconds);
    Ok(Json(ApiResponse::ok("Knob timer running", status)))
}

/// Handle POST /knob/pause - Freeze the knob timer
pub async fn knob_pause_handler(State(state): State<Arc<AppState>>) -> KnobResult {
    let status = state.knob_pause()?;
    Ok(Json(ApiResponse::ok("Knob timer paused", status)))
}

/// Handle POST /knob/reset - Unlock and return to the configuration
pub async fn knob_reset_handler(State(state): State<Arc<AppState>>) -> KnobResult {
    let status = state.knob_reset()?;
    Ok(Json(ApiResponse::ok("Knob timer reset", status)))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (last_action, last_action_time) = state.get_last_action();
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    })
}
