//! Kanban board with a task cap shared across columns

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{clean_text, WidgetError};

/// Most cards the whole board holds at once
pub const MAX_KANBAN_TASKS: usize = 8;

const DEFAULT_COLUMNS: [(&str, &str); 3] = [
    ("todo", "To Do"),
    ("inProgress", "In Progress"),
    ("done", "Done"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanTask {
    pub id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub id: String,
    pub title: String,
    pub tasks: Vec<KanbanTask>,
}

impl KanbanColumn {
    fn empty(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            tasks: Vec::new(),
        }
    }
}

/// Board persisted as its bare column array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KanbanBoard {
    columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    /// Board with the three standard, empty columns
    pub fn new() -> Self {
        Self {
            columns: DEFAULT_COLUMNS
                .iter()
                .map(|(id, title)| KanbanColumn::empty(id, title))
                .collect(),
        }
    }

    /// Re-add any standard column missing from a loaded board
    pub fn with_default_columns(mut self) -> Self {
        for (id, title) in DEFAULT_COLUMNS {
            if !self.columns.iter().any(|column| column.id == id) {
                info!("Restoring missing kanban column '{}'", id);
                self.columns.push(KanbanColumn::empty(id, title));
            }
        }
        self
    }

    pub fn columns(&self) -> &[KanbanColumn] {
        &self.columns
    }

    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    pub fn add_task(&mut self, column_id: &str, content: &str) -> Result<&KanbanTask, WidgetError> {
        let content = clean_text(content)?;
        if self.total_tasks() >= MAX_KANBAN_TASKS {
            return Err(WidgetError::LimitReached { limit: MAX_KANBAN_TASKS });
        }

        let column = self.column_mut(column_id)?;
        let task = KanbanTask {
            id: Uuid::new_v4(),
            content,
        };
        debug!("Adding kanban task {} to '{}'", task.id, column.id);
        column.tasks.push(task);
        Ok(&column.tasks[column.tasks.len() - 1])
    }

    pub fn delete_task(&mut self, column_id: &str, task_id: Uuid) -> Result<KanbanTask, WidgetError> {
        let column = self.column_mut(column_id)?;
        take_task(column, task_id)
    }

    /// Move a card to the end of another column; same-column moves do nothing
    pub fn move_task(&mut self, task_id: Uuid, from: &str, to: &str) -> Result<(), WidgetError> {
        // Validate the destination before touching the source
        self.column_mut(to)?;
        if from == to {
            let column = self.column_mut(from)?;
            if !column.tasks.iter().any(|task| task.id == task_id) {
                return Err(task_not_found(task_id));
            }
            return Ok(());
        }

        let task = take_task(self.column_mut(from)?, task_id)?;
        self.column_mut(to)?.tasks.push(task);
        debug!("Moved kanban task {} from '{}' to '{}'", task_id, from, to);
        Ok(())
    }

    fn column_mut(&mut self, column_id: &str) -> Result<&mut KanbanColumn, WidgetError> {
        self.columns
            .iter_mut()
            .find(|column| column.id == column_id)
            .ok_or_else(|| WidgetError::NotFound {
                kind: "column",
                id: column_id.to_string(),
            })
    }
}

impl Default for KanbanBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn take_task(column: &mut KanbanColumn, task_id: Uuid) -> Result<KanbanTask, WidgetError> {
    let index = column
        .tasks
        .iter()
        .position(|task| task.id == task_id)
        .ok_or_else(|| task_not_found(task_id))?;
    Ok(column.tasks.remove(index))
}

fn task_not_found(task_id: Uuid) -> WidgetError {
    WidgetError::NotFound {
        kind: "task",
        id: task_id.to_string(),
    }
}
