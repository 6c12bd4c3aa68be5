//! Persisted productivity widgets
//!
//! The to-do list, kanban board and flip clock that sit next to the timer.

pub mod clock;
pub mod kanban;
pub mod todo;

use thiserror::Error;

// Re-export main types
pub use clock::ClockFace;
pub use kanban::{KanbanBoard, KanbanColumn, KanbanTask, MAX_KANBAN_TASKS};
pub use todo::{Todo, TodoList, MAX_TODOS};

/// Longest text a to-do or card may hold
pub const MAX_TEXT_CHARS: usize = 100;

/// Errors raised by widget mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("text must not be empty")]
    EmptyText,

    #[error("limit of {limit} items reached")]
    LimitReached { limit: usize },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

/// Trim and cap user-entered text
pub(crate) fn clean_text(text: &str) -> Result<String, WidgetError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(WidgetError::EmptyText);
    }
    Ok(trimmed.chars().take(MAX_TEXT_CHARS).collect())
}
