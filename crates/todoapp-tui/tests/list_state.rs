//! Presentation state over real JSON storage in a temp dir.

use std::sync::Arc;

use chrono::NaiveDate;
use todoapp_core::{Change, Filter, SortOrder};
use todoapp_service::{BlockingController, ServiceError};
use todoapp_store::{JsonFileStorage, MemoryStorage};
use todoapp_tui::edit::EditDraft;
use todoapp_tui::state::{Direction, InputField, TodoListState};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn open(path: &std::path::Path) -> TodoListState {
    let controller = BlockingController::new(Arc::new(JsonFileStorage::at(path)));
    let mut state = TodoListState::new(controller, SortOrder::Ascending);
    state.set_today(today());
    state.load(false).unwrap();
    state
}

fn add(state: &mut TodoListState, title: &str, due: &str) -> Change {
    state.input_mut(InputField::Title).push_str(title);
    state.input_mut(InputField::Due).push_str(due);
    state.add().unwrap()
}

fn titles(state: &TodoListState) -> Vec<String> {
    state.items().iter().map(|i| i.title.clone()).collect()
}

#[test]
fn write_report_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("todos.json");

    let mut state = open(&path);
    assert_eq!(state.items_count_text(), "0 tasks");
    add(&mut state, "Write report", "");
    assert_eq!(state.items_count_text(), "1 task");
    assert!(state.status_text().starts_with("Saved "));

    let reopened = open(&path);
    assert_eq!(titles(&reopened), vec!["Write report"]);
    assert!(!reopened.items()[0].is_completed);
    assert_eq!(reopened.items()[0].due_date, None);
    assert_eq!(reopened.items()[0].id, state.items()[0].id);
}

#[test]
fn add_trims_and_clears_inputs() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = open(&tmp.path().join("todos.json"));

    let change = add(&mut state, "  Quiz  ", "2026-10-10");
    let item = &state.items()[0];
    assert_eq!(change, Change::Added { id: item.id, index: 0 });
    assert_eq!(item.title, "Quiz");
    assert_eq!(item.due_day(), NaiveDate::from_ymd_opt(2026, 10, 10));
    assert_eq!(state.input(InputField::Title), "");
    assert_eq!(state.input(InputField::Due), "");
}

#[test]
fn add_rejects_blank_title_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("todos.json");
    let mut state = open(&path);

    state.input_mut(InputField::Title).push_str("   ");
    let err = state.add().unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTitle));
    assert!(!err.is_write_failure());
    assert!(state.items().is_empty());
    assert!(!path.exists());
    assert_eq!(state.input(InputField::Title), "   ");
}

#[test]
fn overdue_item_is_flagged_until_completed() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = open(&tmp.path().join("todos.json"));
    add(&mut state, "Work", "-3");

    let id = state.items()[0].id;
    assert!(state.items()[0].is_overdue_on(today()));

    state.toggle_completed(id).unwrap();
    assert!(!state.items()[0].is_overdue_on(today()));
}

#[test]
fn filter_projection_tracks_collection() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = open(&tmp.path().join("todos.json"));
    add(&mut state, "A", "");
    add(&mut state, "B", "");
    add(&mut state, "C", "");
    let b = state.items()[1].id;
    state.toggle_completed(b).unwrap();

    assert_eq!(state.set_filter(Filter::Active), Change::FilterChanged(Filter::Active));
    let view: Vec<&str> = state.view_items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(view, vec!["A", "C"]);

    state.set_filter(Filter::Completed);
    let view: Vec<&str> = state.view_items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(view, vec!["B"]);

    // The collection itself is untouched by filtering
    assert_eq!(titles(&state), vec!["A", "B", "C"]);
    assert_eq!(state.items_count_text(), "3 tasks");

    state.toggle_completed(b).unwrap();
    assert!(state.view_items().is_empty());
}

#[test]
fn toggle_sort_is_durable() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("todos.json");
    let mut state = open(&path);
    add(&mut state, "Someday", "");
    add(&mut state, "Quiz", "2026-10-10");
    add(&mut state, "Homework Math", "2026-12-15");
    add(&mut state, "Alpha", "2026-10-10");

    assert_eq!(state.toggle_sort().unwrap(), Change::Sorted(SortOrder::Ascending));
    let expected = vec!["Alpha", "Quiz", "Homework Math", "Someday"];
    assert_eq!(titles(&state), expected);
    assert_eq!(titles(&open(&path)), expected);

    assert_eq!(state.toggle_sort().unwrap(), Change::Sorted(SortOrder::Descending));
    let expected = vec!["Homework Math", "Alpha", "Quiz", "Someday"];
    assert_eq!(titles(&state), expected);
    assert_eq!(titles(&open(&path)), expected);

    // The reopened session shows the stored order without claiming a sort
    let reopened = open(&path);
    assert_eq!(reopened.sort_order(), None);
    assert_eq!(reopened.sort_label(), "Stored order");
}

#[test]
fn descending_start_labels_stored_order_until_sorted() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("todos.json");
    {
        let mut seed = open(&path);
        add(&mut seed, "Early", "2026-01-01");
        add(&mut seed, "Late", "2026-12-01");
    }

    let controller = BlockingController::new(Arc::new(JsonFileStorage::at(&path)));
    let mut state = TodoListState::new(controller, SortOrder::Descending);
    state.set_today(today());
    state.load(false).unwrap();

    assert_eq!(state.sort_order(), None);
    assert_eq!(state.sort_label(), "Stored order");
    assert_eq!(titles(&state), vec!["Early", "Late"]);

    // First sort applies the starting direction
    assert_eq!(state.toggle_sort().unwrap(), Change::Sorted(SortOrder::Descending));
    assert_eq!(state.sort_label(), "Due Date (Latest First)");
    assert_eq!(titles(&state), vec!["Late", "Early"]);

    // Appending breaks the order, so the label drops back
    add(&mut state, "Earliest", "2025-01-01");
    assert_eq!(titles(&state), vec!["Late", "Early", "Earliest"]);
    assert_eq!(state.sort_order(), None);
    assert_eq!(state.sort_label(), "Stored order");

    // Sorting again from stored order keeps the last direction, then flips
    assert_eq!(state.toggle_sort().unwrap(), Change::Sorted(SortOrder::Descending));
    assert_eq!(titles(&state), vec!["Late", "Early", "Earliest"]);
    assert_eq!(state.toggle_sort().unwrap(), Change::Sorted(SortOrder::Ascending));
    assert_eq!(titles(&state), vec!["Earliest", "Early", "Late"]);
}

#[test]
fn edit_and_reorder_clear_the_sort_label() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = open(&tmp.path().join("todos.json"));
    add(&mut state, "A", "2026-10-20");
    add(&mut state, "B", "2026-10-21");
    state.toggle_sort().unwrap();

    state.reorder(0, 1).unwrap();
    assert_eq!(state.sort_order(), None);

    state.toggle_sort().unwrap();
    assert!(state.sort_order().is_some());
    let mut draft = EditDraft::from_item(&state.items()[0], today());
    draft.set_due("2026-12-31");
    state.edit(&draft).unwrap();
    assert_eq!(state.sort_order(), None);

    // Out-of-range moves change nothing
    state.toggle_sort().unwrap();
    assert!(state.reorder(0, 9).is_err());
    assert!(state.sort_order().is_some());
}

#[test]
fn bad_due_date_is_invalid_input_not_invalid_title() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = open(&tmp.path().join("todos.json"));
    state.input_mut(InputField::Title).push_str("Quiz");
    state.input_mut(InputField::Due).push_str("someday");
    let err = state.add().unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(ref msg) if msg.contains("someday")));
    assert!(state.items().is_empty());
}

#[test]
fn edit_draft_applies_and_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("todos.json");
    let mut state = open(&path);
    add(&mut state, "Quiz", "2026-10-10");

    let mut draft = EditDraft::from_item(&state.items()[0], today());
    assert_eq!(draft.field(InputField::Due), "2026-10-10");
    draft.set_title("Final quiz");
    draft.set_due("");
    state.edit(&draft).unwrap();

    let reopened = open(&path);
    assert_eq!(reopened.items()[0].title, "Final quiz");
    assert_eq!(reopened.items()[0].due_date, None);
}

#[test]
fn move_in_view_skips_hidden_items() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = open(&tmp.path().join("todos.json"));
    add(&mut state, "A", "");
    add(&mut state, "B", "");
    add(&mut state, "C", "");
    let b = state.items()[1].id;
    let c = state.items()[2].id;
    state.toggle_completed(b).unwrap();
    state.set_filter(Filter::Active);

    // C's visible neighbour above is A
    let change = state.move_in_view(c, Direction::Up).unwrap();
    assert!(matches!(change, Some(Change::Moved { from: 2, to: 0, .. })));
    assert_eq!(titles(&state), vec!["C", "A", "B"]);

    assert_eq!(state.move_in_view(c, Direction::Up).unwrap(), None);
    assert!(state.move_in_view(b, Direction::Down).is_err());
}

#[test]
fn delete_unknown_id_is_reported_not_failed() {
    let tmp = tempfile::tempdir().unwrap();
    let mut state = open(&tmp.path().join("todos.json"));
    add(&mut state, "Quiz", "");
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        state.delete(missing).unwrap(),
        Change::Missing { id: missing }
    );
    assert_eq!(state.items().len(), 1);
}

#[test]
fn seeding_only_fills_an_empty_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("todos.json");

    let controller = BlockingController::new(Arc::new(JsonFileStorage::at(&path)));
    let mut state = TodoListState::new(controller, SortOrder::Ascending);
    state.set_today(today());
    state.load(true).unwrap();

    assert_eq!(
        titles(&state),
        vec!["Homework Math", "Quiz", "Work", "Homework 2"]
    );
    assert_eq!(
        state.items()[1].due_day(),
        NaiveDate::from_ymd_opt(2026, 10, 10)
    );
    assert!(state.items()[2].is_overdue_on(today()));
    assert!(state.items()[3].is_completed);
    assert!(path.exists());

    // Second launch keeps what is on disk
    let mut again = TodoListState::new(
        BlockingController::new(Arc::new(JsonFileStorage::at(&path))),
        SortOrder::Ascending,
    );
    again.set_today(today());
    again.load(true).unwrap();
    assert_eq!(again.items().len(), 4);
}

#[test]
fn write_failure_keeps_memory_and_marks_dirty() {
    let storage = Arc::new(MemoryStorage::new());
    let mut state = TodoListState::new(
        BlockingController::new(storage.clone()),
        SortOrder::Ascending,
    );
    state.set_today(today());
    state.load(false).unwrap();

    storage.set_fail_writes(true);
    state.input_mut(InputField::Title).push_str("Quiz");
    let err = state.add().unwrap_err();
    assert!(err.is_write_failure());
    assert_eq!(titles(&state), vec!["Quiz"]);
    assert!(state.is_dirty());
    assert_eq!(state.status_text(), "Unsaved changes");
    // Inputs are cleared because the item was accepted
    assert_eq!(state.input(InputField::Title), "");
    assert!(storage.snapshot().is_empty());

    storage.set_fail_writes(false);
    state.retry_save().unwrap();
    assert!(!state.is_dirty());
    assert_eq!(storage.snapshot().len(), 1);
}
