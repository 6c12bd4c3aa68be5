//! To-do list

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{clean_text, WidgetError};

/// Most to-dos the list holds at once
pub const MAX_TODOS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

/// Ordered list of to-dos, persisted as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_TODOS
    }

    pub fn add(&mut self, text: &str) -> Result<&Todo, WidgetError> {
        let text = clean_text(text)?;
        if self.is_full() {
            return Err(WidgetError::LimitReached { limit: MAX_TODOS });
        }

        let todo = Todo {
            id: Uuid::new_v4(),
            text,
            completed: false,
        };
        debug!("Adding to-do {}", todo.id);
        self.items.push(todo);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn toggle(&mut self, id: Uuid) -> Result<&Todo, WidgetError> {
        let todo = self.find_mut(id)?;
        todo.completed = !todo.completed;
        Ok(todo)
    }

    pub fn edit(&mut self, id: Uuid, text: &str) -> Result<&Todo, WidgetError> {
        let text = clean_text(text)?;
        let todo = self.find_mut(id)?;
        todo.text = text;
        Ok(todo)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Todo, WidgetError> {
        let index = self
            .items
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.items.remove(index))
    }

    fn find_mut(&mut self, id: Uuid) -> Result<&mut Todo, WidgetError> {
        self.items
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> WidgetError {
    WidgetError::NotFound {
        kind: "to-do",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_starts_incomplete() {
        let mut list = TodoList::new();
        let todo = list.add("  write report  ").unwrap().clone();
        assert_eq!(todo.text, "write report");
        assert!(!todo.completed);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut list = TodoList::new();
        assert_eq!(list.add("   ").unwrap_err(), WidgetError::EmptyText);
        assert!(list.is_empty());
    }

    #[test]
    fn test_limit_is_six() {
        let mut list = TodoList::new();
        for i in 0..MAX_TODOS {
            list.add(&format!("task {}", i)).unwrap();
        }
        assert!(list.is_full());
        assert_eq!(list.add("one more").unwrap_err(), WidgetError::LimitReached { limit: 6 });
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn test_toggle_edit_remove() {
        let mut list = TodoList::new();
        let id = list.add("draft").unwrap().id;

        assert!(list.toggle(id).unwrap().completed);
        assert!(!list.toggle(id).unwrap().completed);

        assert_eq!(list.edit(id, " final ").unwrap().text, "final");
        assert_eq!(list.edit(id, "").unwrap_err(), WidgetError::EmptyText);

        let removed = list.remove(id).unwrap();
        assert_eq!(removed.text, "final");
        assert!(matches!(list.remove(id), Err(WidgetError::NotFound { .. })));
    }

    #[test]
    fn test_persisted_as_plain_array() {
        let mut list = TodoList::new();
        list.add("a").unwrap();
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        let back: TodoList = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }
}
