//! HTTP API handlers.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::todo::{NewTodo, Todo, TodoPatch, TodoStore};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The shared todo store.
    pub store: TodoStore,
    /// Process start time, reported as uptime by the health endpoint.
    pub started_at: Instant,
    /// Prometheus scrape handle. Absent when no recorder is installed
    /// (unit tests); the `/metrics` route is only mounted when present.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store.
    pub fn new(store: TodoStore) -> Self {
        Self {
            store,
            started_at: Instant::now(),
            metrics: None,
        }
    }

    /// Attach the Prometheus scrape handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TodoStore::new())
    }
}

/// Uniform response envelope.
///
/// Success responses carry `data` (and optionally `message`); failure
/// responses carry `error` and omit `data`. Absent fields are omitted from
/// the JSON output.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload for successful responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Optional human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error description for failed responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    /// Successful response carrying `data` and a message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }

    /// Successful response carrying only a message (delete confirmation).
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }
}

/// Request body for creating a todo.
///
/// `title` is optional at the type level so a missing field reaches our
/// validation and produces the 400 envelope instead of a framework
/// deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// Todo title. Required, must be non-empty after trimming.
    pub title: Option<String>,
    /// Optional free-form description.
    pub description: Option<String>,
}

/// Request body for partially updating a todo.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    /// True when no field was supplied at all.
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Health check response consumed by container liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Current server time, RFC 3339.
    pub timestamp: String,
    /// Seconds since process start.
    pub uptime: f64,
}

/// `GET /api/todos` - list all todos.
pub async fn list_todos(State(state): State<AppState>) -> Json<ApiResponse<Vec<Todo>>> {
    let todos = state.store.find_all().await;
    let message = format!("Found {} todo(s)", todos.len());
    Json(ApiResponse::with_message(todos, message))
}

/// `GET /api/todos/:id` - fetch a single todo.
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Todo>>> {
    let todo = state
        .store
        .find_by_id(&id)
        .await
        .ok_or(ApiError::NotFound(id))?;

    Ok(Json(ApiResponse::data(todo)))
}

/// `POST /api/todos` - create a todo.
pub async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Todo>>)> {
    let title = match req.title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            metrics::inc_validation_failures();
            return Err(ApiError::Validation(
                "Title is required and cannot be empty".to_string(),
            ));
        }
    };

    let todo = state
        .store
        .create(NewTodo {
            title,
            description: req.description.map(|d| d.trim().to_string()),
        })
        .await;

    metrics::inc_todos_created();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(todo, "Todo created successfully")),
    ))
}

/// `PUT /api/todos/:id` - partially update a todo.
///
/// Both validation checks run before the store call; the not-found outcome
/// comes from the store's absence result after. A supplied description that
/// trims to the empty string is still "supplied" and is stored as such.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> ApiResult<Json<ApiResponse<Todo>>> {
    if req.is_empty() {
        metrics::inc_validation_failures();
        return Err(ApiError::Validation(
            "At least one field (title, description, completed) must be provided".to_string(),
        ));
    }

    let title = match req.title.as_deref().map(str::trim) {
        Some("") => {
            metrics::inc_validation_failures();
            return Err(ApiError::Validation("Title cannot be empty".to_string()));
        }
        Some(t) => Some(t.to_string()),
        None => None,
    };

    let patch = TodoPatch {
        title,
        description: req.description.map(|d| d.trim().to_string()),
        completed: req.completed,
    };

    let todo = state
        .store
        .update(&id, patch)
        .await
        .ok_or(ApiError::NotFound(id))?;

    metrics::inc_todos_updated();
    Ok(Json(ApiResponse::with_message(todo, "Todo updated successfully")))
}

/// `DELETE /api/todos/:id` - delete a todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Todo>>> {
    if !state.store.delete(&id).await {
        return Err(ApiError::NotFound(id));
    }

    metrics::inc_todos_deleted();
    Ok(Json(ApiResponse::message_only("Todo deleted successfully")))
}

/// `GET /health` - liveness/readiness probe. Always returns 200.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(HealthResponse {
        status: "healthy",
        timestamp,
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// `GET /` - service metadata.
pub async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Todo API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "endpoints": {
            "health": "GET /health",
            "todos": {
                "list": "GET /api/todos",
                "get": "GET /api/todos/:id",
                "create": "POST /api/todos",
                "update": "PUT /api/todos/:id",
                "delete": "DELETE /api/todos/:id"
            }
        }
    }))
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": "Route not found"
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_key() {
        let value = serde_json::to_value(ApiResponse::data(1)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 1);
        assert!(value.get("error").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn message_only_envelope_omits_data_key() {
        let value =
            serde_json::to_value(ApiResponse::<Todo>::message_only("done")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "done");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn update_request_emptiness_tracks_field_presence() {
        assert!(UpdateTodoRequest::default().is_empty());

        let req = UpdateTodoRequest {
            completed: Some(false),
            ..UpdateTodoRequest::default()
        };
        assert!(!req.is_empty());
    }
}
