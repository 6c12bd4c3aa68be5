//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    state::AppState,
    timer::{TimerSettings, TimerSnapshot},
    widgets::{ClockFace, KanbanTask, Todo},
};
use super::responses::{
    BoardResponse, CardRequest, DraftRequest, HealthResponse, MoveRequest, SettingsResponse,
    StatusResponse, TodoRequest, TodosResponse,
};

type ApiResult<T> = Result<Json<T>, AppError>;

/// Handle GET /timer - Current countdown
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Json<TimerSnapshot> {
    Json(state.timer_snapshot())
}

/// Handle POST /timer/start
pub async fn timer_start_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerSnapshot> {
    let snapshot = state.start_timer()?;
    info!("Start endpoint called - {} remaining", snapshot.display);
    Ok(Json(snapshot))
}

/// Handle POST /timer/pause
pub async fn timer_pause_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerSnapshot> {
    let snapshot = state.pause_timer()?;
    info!("Pause endpoint called - {} remaining", snapshot.display);
    Ok(Json(snapshot))
}

/// Handle POST /timer/toggle - The single start/pause button
pub async fn timer_toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerSnapshot> {
    Ok(Json(state.toggle_timer()?))
}

/// Handle POST /timer/reset
pub async fn timer_reset_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerSnapshot> {
    Ok(Json(state.reset_timer()?))
}

/// Handle GET /timer/settings
pub async fn settings_handler(State(state): State<Arc<AppState>>) -> ApiResult<SettingsResponse> {
    let (committed, draft) = state.settings_view()?;
    Ok(Json(SettingsResponse::new(committed, draft)))
}

/// Handle POST /timer/settings/open - Snapshot committed settings into a draft
pub async fn settings_open_handler(State(state): State<Arc<AppState>>) -> ApiResult<SettingsResponse> {
    let draft = state.open_settings()?;
    let committed = state.timer.settings()?;
    Ok(Json(SettingsResponse::new(committed, Some(draft))))
}

/// Handle PUT /timer/settings/draft - Move the sliders
pub async fn settings_draft_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DraftRequest>,
) -> ApiResult<TimerSettings> {
    Ok(Json(state.update_draft(request.clamped_focus(), request.clamped_break())?))
}

/// Handle POST /timer/settings/save - Commit the draft
pub async fn settings_save_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerSnapshot> {
    let snapshot = state.save_settings()?;
    info!(
        "Settings saved - focus={}min, break={}min",
        snapshot.settings.focus_minutes, snapshot.settings.break_minutes
    );
    Ok(Json(snapshot))
}

/// Handle POST /timer/settings/cancel - Discard the draft
pub async fn settings_cancel_handler(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    state.cancel_settings()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handle GET /todos
pub async fn todos_handler(State(state): State<Arc<AppState>>) -> ApiResult<TodosResponse> {
    let todos = state.todos()?;
    Ok(Json(TodosResponse::new(todos.items().to_vec())))
}

/// Handle POST /todos
pub async fn todo_add_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TodoRequest>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = state.add_todo(&request.text)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Handle PATCH /todos/:id - Replace the text
pub async fn todo_edit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<TodoRequest>,
) -> ApiResult<Todo> {
    Ok(Json(state.edit_todo(id, &request.text)?))
}

/// Handle POST /todos/:id/toggle
pub async fn todo_toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Todo> {
    Ok(Json(state.toggle_todo(id)?))
}

/// Handle DELETE /todos/:id
pub async fn todo_delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Todo> {
    Ok(Json(state.remove_todo(id)?))
}

/// Handle GET /kanban
pub async fn board_handler(State(state): State<Arc<AppState>>) -> ApiResult<BoardResponse> {
    Ok(Json(state.board()?.into()))
}

/// Handle POST /kanban/:column/tasks
pub async fn card_add_handler(
    State(state): State<Arc<AppState>>,
    Path(column): Path<String>,
    Json(request): Json<CardRequest>,
) -> Result<(StatusCode, Json<KanbanTask>), AppError> {
    let task = state.add_kanban_task(&column, &request.content)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handle DELETE /kanban/:column/tasks/:task_id
pub async fn card_delete_handler(
    State(state): State<Arc<AppState>>,
    Path((column, task_id)): Path<(String, Uuid)>,
) -> ApiResult<KanbanTask> {
    Ok(Json(state.delete_kanban_task(&column, task_id)?))
}

/// Handle POST /kanban/:column/tasks/:task_id/move - Drop a card on another column
pub async fn card_move_handler(
    State(state): State<Arc<AppState>>,
    Path((column, task_id)): Path<(String, Uuid)>,
    Json(request): Json<MoveRequest>,
) -> ApiResult<BoardResponse> {
    let board = state.move_kanban_task(task_id, &column, &request.to)?;
    Ok(Json(board.into()))
}

/// Handle GET /clock - Flip clock face for local time
pub async fn clock_handler() -> Json<ClockFace> {
    Json(ClockFace::now())
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.timer_snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
