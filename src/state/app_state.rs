//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::TimerSession;
use crate::{
    error::AppError,
    services::PhaseNotifier,
    storage::{Persistence, KANBAN_KEY, TIMER_SETTINGS_KEY, TODOS_KEY},
    timer::{EditorError, SettingsEditor, TimerSettings, TimerSnapshot},
    widgets::{KanbanBoard, KanbanTask, Todo, TodoList, WidgetError},
};

/// Main application state that owns every widget
#[derive(Debug)]
pub struct AppState {
    /// Pomodoro timer and its ticker
    pub timer: Arc<TimerSession>,
    /// Draft settings, isolated from the running timer
    pub editor: Mutex<SettingsEditor>,
    pub todos: Mutex<TodoList>,
    pub board: Mutex<KanbanBoard>,
    persistence: Persistence,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create the application state, loading every widget from `persistence`
    pub fn new(
        persistence: Persistence,
        notifier: Arc<dyn PhaseNotifier>,
        port: u16,
        host: String,
    ) -> Self {
        let settings = persistence
            .load(TIMER_SETTINGS_KEY, TimerSettings::default())
            .clamped();
        let todos: TodoList = persistence.load(TODOS_KEY, TodoList::new());
        let board = persistence
            .load(KANBAN_KEY, KanbanBoard::new())
            .with_default_columns();

        info!(
            "Loaded state: focus={}min, break={}min, {} to-dos, {} kanban tasks",
            settings.focus_minutes,
            settings.break_minutes,
            todos.len(),
            board.total_tasks()
        );

        Self {
            timer: TimerSession::new(settings, notifier),
            editor: Mutex::new(SettingsEditor::new()),
            todos: Mutex::new(todos),
            board: Mutex::new(board),
            persistence,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply `updater` to a persisted widget, saving it under `key` on success
    fn mutate<T, R, F>(&self, widget: &Mutex<T>, key: &str, action: &str, updater: F) -> Result<R, AppError>
    where
        T: Serialize,
        F: FnOnce(&mut T) -> Result<R, WidgetError>,
    {
        let mut value = widget
            .lock()
            .map_err(|e| format!("Failed to lock {}: {}", key, e))?;

        let result = updater(&mut *value)?;
        self.persistence.save(key, &*value);
        drop(value); // Release the lock early

        self.record_action(action);
        Ok(result)
    }

    fn snapshot_of<T: Clone>(widget: &Mutex<T>, what: &str) -> Result<T, AppError> {
        widget
            .lock()
            .map(|value| value.clone())
            .map_err(|e| AppError::Internal(format!("Failed to lock {}: {}", what, e)))
    }

    // ---- timer ----

    pub fn start_timer(&self) -> Result<TimerSnapshot, AppError> {
        let snapshot = self.timer.start()?;
        self.record_action("timer-start");
        Ok(snapshot)
    }

    pub fn pause_timer(&self) -> Result<TimerSnapshot, AppError> {
        let snapshot = self.timer.pause()?;
        self.record_action("timer-pause");
        Ok(snapshot)
    }

    pub fn toggle_timer(&self) -> Result<TimerSnapshot, AppError> {
        let snapshot = self.timer.toggle()?;
        self.record_action("timer-toggle");
        Ok(snapshot)
    }

    pub fn reset_timer(&self) -> Result<TimerSnapshot, AppError> {
        let snapshot = self.timer.reset()?;
        self.record_action("timer-reset");
        Ok(snapshot)
    }

    pub fn timer_snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    // ---- settings editor ----

    /// Committed settings and the editor draft, if open
    pub fn settings_view(&self) -> Result<(TimerSettings, Option<TimerSettings>), AppError> {
        let committed = self.timer.settings()?;
        let draft = Self::snapshot_of(&self.editor, "settings editor")?.draft();
        Ok((committed, draft))
    }

    pub fn open_settings(&self) -> Result<TimerSettings, AppError> {
        let committed = self.timer.settings()?;
        let mut editor = self
            .editor
            .lock()
            .map_err(|e| format!("Failed to lock settings editor: {}", e))?;
        Ok(editor.open(committed))
    }

    /// Move the draft sliders; values are clamped and stepped, never rejected
    pub fn update_draft(
        &self,
        focus_minutes: Option<u32>,
        break_minutes: Option<u32>,
    ) -> Result<TimerSettings, AppError> {
        let mut editor = self
            .editor
            .lock()
            .map_err(|e| format!("Failed to lock settings editor: {}", e))?;

        let mut draft = editor.draft().ok_or(EditorError::EditorClosed)?;
        if let Some(minutes) = focus_minutes {
            draft = editor.set_focus_minutes(minutes)?;
        }
        if let Some(minutes) = break_minutes {
            draft = editor.set_break_minutes(minutes)?;
        }
        Ok(draft)
    }

    pub fn cancel_settings(&self) -> Result<(), AppError> {
        let mut editor = self
            .editor
            .lock()
            .map_err(|e| format!("Failed to lock settings editor: {}", e))?;
        editor.cancel();
        Ok(())
    }

    /// Commit the draft into the timer and persist it
    ///
    /// The editor stays open with its draft if the timer cannot take it.
    pub fn save_settings(&self) -> Result<TimerSnapshot, AppError> {
        let mut editor = self
            .editor
            .lock()
            .map_err(|e| format!("Failed to lock settings editor: {}", e))?;
        let draft = editor.draft().ok_or(EditorError::EditorClosed)?;

        let snapshot = self.timer.apply_settings(draft)?;
        editor.save()?;
        drop(editor);

        self.persistence.save(TIMER_SETTINGS_KEY, &snapshot.settings);
        self.record_action("settings-save");
        Ok(snapshot)
    }

    // ---- to-do list ----

    pub fn todos(&self) -> Result<TodoList, AppError> {
        Self::snapshot_of(&self.todos, "to-do list")
    }

    pub fn add_todo(&self, text: &str) -> Result<Todo, AppError> {
        self.mutate(&self.todos, TODOS_KEY, "todo-add", |todos| todos.add(text).cloned())
    }

    pub fn toggle_todo(&self, id: Uuid) -> Result<Todo, AppError> {
        self.mutate(&self.todos, TODOS_KEY, "todo-toggle", |todos| todos.toggle(id).cloned())
    }

    pub fn edit_todo(&self, id: Uuid, text: &str) -> Result<Todo, AppError> {
        self.mutate(&self.todos, TODOS_KEY, "todo-edit", |todos| todos.edit(id, text).cloned())
    }

    pub fn remove_todo(&self, id: Uuid) -> Result<Todo, AppError> {
        self.mutate(&self.todos, TODOS_KEY, "todo-remove", |todos| todos.remove(id))
    }

    // ---- kanban ----

    pub fn board(&self) -> Result<KanbanBoard, AppError> {
        Self::snapshot_of(&self.board, "kanban board")
    }

    pub fn add_kanban_task(&self, column: &str, content: &str) -> Result<KanbanTask, AppError> {
        self.mutate(&self.board, KANBAN_KEY, "kanban-add", |board| {
            board.add_task(column, content).cloned()
        })
    }

    pub fn delete_kanban_task(&self, column: &str, task_id: Uuid) -> Result<KanbanTask, AppError> {
        self.mutate(&self.board, KANBAN_KEY, "kanban-delete", |board| {
            board.delete_task(column, task_id)
        })
    }

    pub fn move_kanban_task(&self, task_id: Uuid, from: &str, to: &str) -> Result<KanbanBoard, AppError> {
        self.mutate(&self.board, KANBAN_KEY, "kanban-move", |board| {
            board.move_task(task_id, from, to)?;
            Ok(board.clone())
        })
    }

    // ---- server ----

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Stop the timer's ticker before the process exits
    pub fn shutdown(&self) {
        self.timer.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::Silent,
        storage::{KeyValueStore, MemoryStore},
        timer::TimerPhase,
    };

    fn state_with(store: Arc<MemoryStore>) -> AppState {
        AppState::new(Persistence::new(store), Arc::new(Silent), 0, "127.0.0.1".to_string())
    }

    #[test]
    fn test_defaults_when_storage_empty() {
        let state = state_with(Arc::new(MemoryStore::new()));
        let snapshot = state.timer_snapshot();
        assert_eq!(snapshot.settings, TimerSettings::new(25, 5));
        assert_eq!(snapshot.runtime.remaining_seconds, 1500);
        assert!(state.todos().unwrap().is_empty());
        assert_eq!(state.board().unwrap().columns().len(), 3);
    }

    #[test]
    fn test_malformed_settings_fall_back_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_item(TIMER_SETTINGS_KEY, r#"{"focusMinutes":"bad"}"#.to_string())
            .unwrap();
        let state = state_with(store);
        assert_eq!(state.timer.settings().unwrap(), TimerSettings::new(25, 5));
    }

    #[test]
    fn test_out_of_range_settings_are_clamped_on_load() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_item(TIMER_SETTINGS_KEY, r#"{"focusMinutes":90,"breakMinutes":0}"#.to_string())
            .unwrap();
        let state = state_with(store);
        assert_eq!(state.timer.settings().unwrap(), TimerSettings::new(60, 1));
    }

    #[test]
    fn test_draft_does_not_touch_timer_until_saved() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());

        state.open_settings().unwrap();
        state.update_draft(Some(40), Some(10)).unwrap();
        assert_eq!(state.timer.settings().unwrap(), TimerSettings::new(25, 5));
        assert_eq!(state.timer_snapshot().runtime.remaining_seconds, 1500);

        let snapshot = state.save_settings().unwrap();
        assert_eq!(snapshot.settings, TimerSettings::new(40, 10));
        assert_eq!(snapshot.runtime.remaining_seconds, 2400);
        assert_eq!(snapshot.runtime.phase, TimerPhase::Focus);
        assert_eq!(
            store.get_item(TIMER_SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"focusMinutes":40,"breakMinutes":10}"#)
        );
        assert_eq!(state.settings_view().unwrap().1, None);
    }

    #[test]
    fn test_cancel_keeps_committed_settings() {
        let state = state_with(Arc::new(MemoryStore::new()));
        state.open_settings().unwrap();
        state.update_draft(Some(60), None).unwrap();
        state.cancel_settings().unwrap();
        assert!(matches!(state.save_settings(), Err(AppError::Editor(_))));
        assert_eq!(state.timer.settings().unwrap(), TimerSettings::new(25, 5));
    }

    #[test]
    fn test_failed_commit_keeps_draft_open() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());
        state.open_settings().unwrap();
        state.update_draft(Some(40), Some(10)).unwrap();

        state.timer.poison();
        assert!(matches!(state.save_settings(), Err(AppError::Internal(_))));

        let editor = state.editor.lock().unwrap();
        assert_eq!(editor.draft(), Some(TimerSettings::new(40, 10)));
        assert_eq!(store.get_item(TIMER_SETTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_update_draft_requires_open_editor() {
        let state = state_with(Arc::new(MemoryStore::new()));
        assert!(matches!(state.update_draft(Some(30), None), Err(AppError::Editor(_))));
    }

    #[test]
    fn test_widgets_persist_and_reload() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());

        let todo = state.add_todo("ship it").unwrap();
        state.toggle_todo(todo.id).unwrap();
        let card = state.add_kanban_task("todo", "review").unwrap();
        state.move_kanban_task(card.id, "todo", "done").unwrap();
        assert_eq!(state.get_last_action().0.as_deref(), Some("kanban-move"));
        drop(state);

        let reloaded = state_with(store);
        let todos = reloaded.todos().unwrap();
        assert_eq!(todos.items().len(), 1);
        assert!(todos.items()[0].completed);
        let board = reloaded.board().unwrap();
        let done = board.columns().iter().find(|c| c.id == "done").unwrap();
        assert_eq!(done.tasks[0].content, "review");
    }

    #[test]
    fn test_failed_mutation_is_not_recorded() {
        let state = state_with(Arc::new(MemoryStore::new()));
        assert!(matches!(state.add_todo("  "), Err(AppError::Widget(WidgetError::EmptyText))));
        assert_eq!(state.get_last_action().0, None);
    }
}
