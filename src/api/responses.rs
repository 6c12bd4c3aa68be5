//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    error::AppError,
    timer::{EditorError, TimerSettings, TimerSnapshot},
    widgets::{KanbanBoard, KanbanColumn, Todo, WidgetError, MAX_KANBAN_TASKS, MAX_TODOS},
};

/// Error body returned for any rejected action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Widget(WidgetError::EmptyText) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Widget(WidgetError::LimitReached { .. }) => StatusCode::CONFLICT,
            AppError::Widget(WidgetError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Editor(EditorError::EditorClosed) => StatusCode::CONFLICT,
            AppError::Internal(message) => {
                error!("Internal error: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Server status with the timer attached
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Committed settings next to the editor's draft
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub committed: TimerSettings,
    pub draft: Option<TimerSettings>,
    pub editor_open: bool,
}

impl SettingsResponse {
    pub fn new(committed: TimerSettings, draft: Option<TimerSettings>) -> Self {
        Self {
            committed,
            draft,
            editor_open: draft.is_some(),
        }
    }
}

/// Slider positions to apply to the draft; absent fields are left alone
///
/// Accepts any integer so out-of-range values reach the editor's clamping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub focus_minutes: Option<i64>,
    pub break_minutes: Option<i64>,
}

impl DraftRequest {
    pub fn clamped_focus(&self) -> Option<u32> {
        self.focus_minutes.map(saturate_minutes)
    }

    pub fn clamped_break(&self) -> Option<u32> {
        self.break_minutes.map(saturate_minutes)
    }
}

fn saturate_minutes(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodosResponse {
    pub todos: Vec<Todo>,
    pub count: usize,
    pub limit: usize,
}

impl TodosResponse {
    pub fn new(todos: Vec<Todo>) -> Self {
        Self {
            count: todos.len(),
            todos,
            limit: MAX_TODOS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub columns: Vec<KanbanColumn>,
    pub total_tasks: usize,
    pub limit: usize,
}

impl From<KanbanBoard> for BoardResponse {
    fn from(board: KanbanBoard) -> Self {
        Self {
            total_tasks: board.total_tasks(),
            columns: board.columns().to_vec(),
            limit: MAX_KANBAN_TASKS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub to: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_request_saturates_into_u32() {
        let request: DraftRequest =
            serde_json::from_str(r#"{"focusMinutes":-10,"breakMinutes":99999999999}"#).unwrap();
        assert_eq!(request.clamped_focus(), Some(0));
        assert_eq!(request.clamped_break(), Some(u32::MAX));

        let empty: DraftRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.clamped_focus(), None);
        assert_eq!(empty.clamped_break(), None);
    }
}
