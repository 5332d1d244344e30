//! Presentation state: the live collection, the new-item inputs, the
//! active filter and sort direction, and the derived projection.
//!
//! Every mutating command goes through the controller, which writes the
//! full collection to storage. Derived values (`view_items`, the count and
//! status texts) are computed on demand from the collection, so they are
//! always in step with it.

use std::path::Path;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate};
use todoapp_core::due::{due_date_from, parse_due_input};
use todoapp_core::{validation, Change, Filter, SortOrder, TodoError, TodoItem, TodoItemFactory};
use todoapp_service::{BlockingController, ServiceError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::edit::EditDraft;

/// Which input field a form is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputField {
    #[default]
    Title,
    Due,
}

impl InputField {
    pub fn next(&self) -> Self {
        match self {
            InputField::Title => InputField::Due,
            InputField::Due => InputField::Title,
        }
    }
}

/// Direction for moving an item among its visible neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

pub struct TodoListState {
    controller: BlockingController,
    factory: TodoItemFactory,
    items: Vec<TodoItem>,
    new_title: String,
    new_due: String,
    filter: Filter,
    /// `None` while the collection is in stored order (after load, add,
    /// edit or a manual move). `Some` only right after a sort.
    sort: Option<SortOrder>,
    /// Direction a sort from stored order applies: the session's starting
    /// direction, then whichever was applied last.
    direction: SortOrder,
    last_saved: DateTime<Local>,
    /// Set when the last save failed; memory is ahead of disk.
    dirty: bool,
    today: Option<NaiveDate>,
}

impl TodoListState {
    pub fn new(controller: BlockingController, direction: SortOrder) -> Self {
        Self {
            controller,
            factory: TodoItemFactory::new(),
            items: Vec::new(),
            new_title: String::new(),
            new_due: String::new(),
            filter: Filter::All,
            sort: None,
            direction,
            last_saved: Local::now(),
            dirty: false,
            today: None,
        }
    }

    /// Pin the date used for overdue checks and relative due dates.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = Some(today);
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Replace the collection with the stored snapshot. When the snapshot is
    /// empty and `seed_samples` is set, a few sample items are inserted and
    /// saved.
    pub fn load(&mut self, seed_samples: bool) -> Result<Change, ServiceError> {
        self.items = self.controller.load();
        self.sort = None;
        info!(
            "loaded {} items from {}",
            self.items.len(),
            self.storage_path().display()
        );

        if self.items.is_empty() && seed_samples {
            self.items = self.sample_items()?;
            let result = self.controller.save(&self.items);
            return self.commit(result);
        }
        Ok(Change::Replaced {
            len: self.items.len(),
        })
    }

    fn sample_items(&self) -> Result<Vec<TodoItem>, TodoError> {
        let today = self.today();
        let year = today.year();
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).map(due_date_from);
        let ago = |n| today.checked_sub_days(Days::new(n)).map(due_date_from);

        let mut finished = self.factory.create("Homework 2", ago(1))?;
        finished.is_completed = true;
        Ok(vec![
            self.factory.create("Homework Math", day(year, 12, 15))?,
            self.factory.create("Quiz", day(year, 10, 10))?,
            self.factory.create("Work", ago(3))?,
            finished,
        ])
    }

    // -- Read side --

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn item(&self, id: Uuid) -> Option<&TodoItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The projection: the collection in its current order, filtered.
    pub fn view_items(&self) -> Vec<&TodoItem> {
        self.filter.apply(&self.items)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The direction the collection is currently sorted in, if it still is.
    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort
    }

    pub fn sort_label(&self) -> &'static str {
        self.sort
            .map(|order| order.display_name())
            .unwrap_or("Stored order")
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved(&self) -> DateTime<Local> {
        self.last_saved
    }

    pub fn storage_path(&self) -> &Path {
        self.controller.storage_path()
    }

    pub fn items_count_text(&self) -> String {
        match self.items.len() {
            1 => "1 task".to_string(),
            n => format!("{n} tasks"),
        }
    }

    pub fn status_text(&self) -> String {
        if self.dirty {
            "Unsaved changes".to_string()
        } else {
            format!("Saved {}", self.last_saved.format("%H:%M"))
        }
    }

    // -- New-item inputs --

    pub fn input(&self, field: InputField) -> &str {
        match field {
            InputField::Title => &self.new_title,
            InputField::Due => &self.new_due,
        }
    }

    pub fn input_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Title => &mut self.new_title,
            InputField::Due => &mut self.new_due,
        }
    }

    pub fn clear_input(&mut self) {
        self.new_title.clear();
        self.new_due.clear();
    }

    // -- Commands --

    /// Create an item from the input fields, append it and save.
    ///
    /// Invalid input leaves everything untouched. On success (or when only
    /// the save failed) the inputs are cleared.
    pub fn add(&mut self) -> Result<Change, ServiceError> {
        if !validation::is_valid_title(Some(self.new_title.as_str())) {
            return Err(TodoError::InvalidTitle.into());
        }
        let title = validation::sanitize_title(Some(self.new_title.as_str()));
        let due = parse_due_input(&self.new_due, self.today())?.map(due_date_from);
        let item = self.factory.create(&title, due)?;

        let result = self.controller.add(&mut self.items, item);
        if applied(&result) {
            // Appended at the end, so the list is no longer sorted
            self.sort = None;
            self.clear_input();
        }
        self.commit(result)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Change, ServiceError> {
        let result = self.controller.delete(&mut self.items, id);
        self.commit(result)
    }

    pub fn toggle_completed(&mut self, id: Uuid) -> Result<Change, ServiceError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        item.toggle_completed();
        let result = self.controller.update(&self.items, id);
        self.commit(result)
    }

    /// Apply an edit draft to the item it was opened for.
    pub fn edit(&mut self, draft: &EditDraft) -> Result<Change, ServiceError> {
        let (title, due) = draft.apply()?;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == draft.id())
            .ok_or_else(|| TodoError::NotFound(draft.id().to_string()))?;
        item.title = title;
        item.due_date = due;
        self.sort = None;
        let result = self.controller.update(&self.items, draft.id());
        self.commit(result)
    }

    /// Switch the filter. View-only: nothing is written.
    pub fn set_filter(&mut self, filter: Filter) -> Change {
        self.filter = filter;
        Change::FilterChanged(filter)
    }

    pub fn cycle_filter(&mut self) -> Change {
        self.set_filter(self.filter.next())
    }

    /// Sort the collection in place and save the new order. From stored
    /// order this re-applies the last direction; on a sorted list it flips.
    pub fn toggle_sort(&mut self) -> Result<Change, ServiceError> {
        let order = self.sort.map_or(self.direction, |current| current.toggled());
        order.sort(&mut self.items);
        self.sort = Some(order);
        self.direction = order;
        let result = self
            .controller
            .save(&self.items)
            .map(|_| Change::Sorted(order));
        self.commit(result)
    }

    /// Move the collection element at `from` to `to` and save.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<Change, ServiceError> {
        let result = self.controller.reorder(&mut self.items, from, to);
        if applied(&result) {
            self.sort = None;
        }
        self.commit(result)
    }

    /// Swap `id` with its neighbour in the projection. Returns `Ok(None)`
    /// when the item is already at that edge of the view.
    pub fn move_in_view(
        &mut self,
        id: Uuid,
        direction: Direction,
    ) -> Result<Option<Change>, ServiceError> {
        let view: Vec<Uuid> = self.view_items().iter().map(|i| i.id).collect();
        let pos = view
            .iter()
            .position(|v| *v == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        let neighbour = match direction {
            Direction::Up if pos > 0 => view[pos - 1],
            Direction::Down if pos + 1 < view.len() => view[pos + 1],
            _ => return Ok(None),
        };

        let from = self.index_of(id);
        let to = self.index_of(neighbour);
        match (from, to) {
            (Some(from), Some(to)) => self.reorder(from, to).map(Some),
            _ => Err(TodoError::NotFound(id.to_string()).into()),
        }
    }

    /// Write the current collection again, e.g. after an earlier save failed.
    pub fn retry_save(&mut self) -> Result<Change, ServiceError> {
        let result = self.controller.save(&self.items);
        self.commit(result)
    }

    fn index_of(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    fn commit(&mut self, result: Result<Change, ServiceError>) -> Result<Change, ServiceError> {
        match &result {
            Ok(_) => {
                self.dirty = false;
                self.last_saved = Local::now();
            }
            Err(e) if e.is_write_failure() => {
                warn!("save failed, keeping unsaved changes: {e}");
                self.dirty = true;
            }
            Err(_) => {}
        }
        result
    }
}

/// True when the collection was changed in memory, whether or not the save
/// that followed succeeded.
fn applied(result: &Result<Change, ServiceError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => e.is_write_failure(),
    }
}
