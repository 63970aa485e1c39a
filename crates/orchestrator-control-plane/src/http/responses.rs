//! HTTP request and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use orchestrator_core::{CoreError, NodeId, TaskId, TaskStatus};

// ============================================================================
// Node types
// ============================================================================

/// Request body for `POST /nodes`.
#[derive(Debug, Deserialize)]
pub struct RegisterNodeRequest {
    pub id: String,

    #[serde(default = "default_healthy")]
    pub healthy: bool,
}

fn default_healthy() -> bool {
    true
}

/// Request body for `PUT /nodes/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateNodeRequest {
    pub healthy: bool,
}

// ============================================================================
// Task types
// ============================================================================

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Generated when absent.
    pub id: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,
}

/// Request body for `PUT /tasks/:id`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub status: TaskStatus,
}

// ============================================================================
// Scheduling types
// ============================================================================

/// Request body for `POST /schedule`.
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub id: String,
}

/// Response body for `POST /schedule`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub task_id: TaskId,
    pub assigned_node: NodeId,
}

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    BadRequest(String),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self::Core(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Core(e) => {
                let status = match &e {
                    CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CoreError::AlreadyExists { .. } => StatusCode::CONFLICT,
                    CoreError::NoCapacity { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    CoreError::StoreUnavailable(_) => {
                        error!(error = %e, "State store failure");
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                };
                (status, e.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
