use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::{validation, TodoError, TodoItem};

pub const DEFAULT_TITLE: &str = "New Task";

/// Builds well-formed items: fresh id, trimmed non-empty title, not completed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoItemFactory;

impl TodoItemFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn create(
        &self,
        title: &str,
        due_date: Option<DateTime<FixedOffset>>,
    ) -> Result<TodoItem, TodoError> {
        validation::validate_title(Some(title))?;
        Ok(TodoItem {
            id: Uuid::new_v4(),
            title: validation::sanitize_title(Some(title)),
            is_completed: false,
            due_date,
        })
    }

    pub fn create_default(&self) -> TodoItem {
        TodoItem {
            id: Uuid::new_v4(),
            title: DEFAULT_TITLE.to_string(),
            is_completed: false,
            due_date: None,
        }
    }
}
