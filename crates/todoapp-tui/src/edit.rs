use chrono::{DateTime, FixedOffset, NaiveDate};
use todoapp_core::due::{due_date_from, format_day, parse_due_input};
use todoapp_core::{validation, TodoError, TodoItem};
use uuid::Uuid;

use crate::state::InputField;

/// Working copy of an item's title and due date while it is being edited.
///
/// The title is re-validated on every change so the form can show an error
/// before the user submits.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    id: Uuid,
    title: String,
    due: String,
    error_message: Option<String>,
    today: NaiveDate,
}

impl EditDraft {
    /// Start editing `item`; relative due dates resolve against `today`.
    pub fn from_item(item: &TodoItem, today: NaiveDate) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            due: item.due_day().map(format_day).unwrap_or_default(),
            error_message: None,
            today,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn field(&self, field: InputField) -> &str {
        match field {
            InputField::Title => &self.title,
            InputField::Due => &self.due,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.validate();
    }

    pub fn set_due(&mut self, due: impl Into<String>) {
        self.due = due.into();
        self.validate();
    }

    pub fn push(&mut self, field: InputField, c: char) {
        let mut value = self.field(field).to_string();
        value.push(c);
        self.set(field, value);
    }

    pub fn pop(&mut self, field: InputField) {
        let mut value = self.field(field).to_string();
        value.pop();
        self.set(field, value);
    }

    pub fn clear(&mut self, field: InputField) {
        self.set(field, String::new());
    }

    fn set(&mut self, field: InputField, value: String) {
        match field {
            InputField::Title => self.set_title(value),
            InputField::Due => self.set_due(value),
        }
    }

    fn validate(&mut self) {
        self.error_message = if !validation::is_valid_title(Some(self.title.as_str())) {
            Some("Title cannot be empty".to_string())
        } else {
            parse_due_input(&self.due, self.today)
                .err()
                .map(|e| e.to_string())
        };
    }

    pub fn is_valid(&self) -> bool {
        self.error_message.is_none() && validation::is_valid_title(Some(self.title.as_str()))
    }

    /// The sanitized title and parsed due date to write back to the item.
    pub fn apply(&self) -> Result<(String, Option<DateTime<FixedOffset>>), TodoError> {
        validation::validate_title(Some(self.title.as_str()))?;
        let due = parse_due_input(&self.due, self.today)?.map(due_date_from);
        Ok((validation::sanitize_title(Some(self.title.as_str())), due))
    }
}
