//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pomodoro timer
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/pause", post(timer_pause_handler))
        .route("/timer/toggle", post(timer_toggle_handler))
        .route("/timer/reset", post(timer_reset_handler))
        .route("/timer/settings", get(settings_handler))
        .route("/timer/settings/open", post(settings_open_handler))
        .route("/timer/settings/draft", put(settings_draft_handler))
        .route("/timer/settings/save", post(settings_save_handler))
        .route("/timer/settings/cancel", post(settings_cancel_handler))
        // To-do list
        .route("/todos", get(todos_handler).post(todo_add_handler))
        .route("/todos/:id", patch(todo_edit_handler).delete(todo_delete_handler))
        .route("/todos/:id/toggle", post(todo_toggle_handler))
        // Kanban board
        .route("/kanban", get(board_handler))
        .route("/kanban/:column/tasks", post(card_add_handler))
        .route("/kanban/:column/tasks/:task_id", delete(card_delete_handler))
        .route("/kanban/:column/tasks/:task_id/move", post(card_move_handler))
        // Flip clock and server
        .route("/clock", get(clock_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
