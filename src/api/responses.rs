//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::{
    recipes::{BrewerId, Recipe},
    state::AppError,
};

/// API response wrapper for timer operations
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: T,
}

impl<T> ApiResponse<T> {
    /// Create a new API response
    pub fn ok(message: impl Into<String>, timer: T) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Error body returned for rejected operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::Timer(_) | AppError::NoRecipeAttached => StatusCode::CONFLICT,
            AppError::RecipeNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Lock(_) | AppError::Recipe(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if code.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };
        (code, Json(body)).into_response()
    }
}

/// Recipe listing entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub brewer: String,
    pub brewer_id: Option<BrewerId>,
    pub brewer_label: Option<&'static str>,
    pub step_count: usize,
    pub total_seconds: u64,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            brewer: recipe.brewer.clone(),
            brewer_id: recipe.brewer_id,
            brewer_label: recipe.brewer_id.map(|b| b.label()),
            step_count: recipe.steps.len(),
            total_seconds: recipe.total_duration(),
            last_used_at: recipe.last_used_at,
        }
    }
}

/// Knob configuration request body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KnobConfigRequest {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}
