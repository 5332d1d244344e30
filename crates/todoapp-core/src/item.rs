use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One to-do entry as stored in `todos.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
}

impl TodoItem {
    /// The due date truncated to a calendar day.
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|d| d.date_naive())
    }

    /// True when the item has a due day strictly before `today` and is not completed.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.is_completed && self.due_day().is_some_and(|day| day < today)
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    pub fn toggle_completed(&mut self) {
        self.is_completed = !self.is_completed;
    }
}
