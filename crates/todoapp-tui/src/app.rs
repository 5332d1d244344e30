use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use todoapp_core::{Change, Filter};
use todoapp_service::ServiceError;
use uuid::Uuid;

use crate::components::todo_list::TodoList;
use crate::edit::EditDraft;
use crate::state::{Direction as MoveDirection, InputField, TodoListState};

/// What the app is currently doing
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// List navigation
    Normal,
    /// Filling in the new-item form
    NewItem { field: InputField },
    /// Editing an existing item's title and due date
    Edit { draft: EditDraft, field: InputField },
    /// Confirm delete item
    ConfirmDelete { id: Uuid, title: String },
    /// Key reference
    Help,
}

pub struct App {
    state: TodoListState,
    list: TodoList,
    mode: Mode,
    status_message: Option<String>,
}

impl App {
    pub fn new(state: TodoListState) -> Self {
        let mut list = TodoList::new();
        list.clamp(state.view_items().len());
        Self {
            state,
            list,
            mode: Mode::Normal,
            status_message: None,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::NewItem { .. } | Mode::Edit { .. })
    }

    /// Id of the highlighted item in the current projection.
    pub fn selected_id(&self) -> Option<Uuid> {
        let view = self.state.view_items();
        self.list.selected_item(&view).map(|i| i.id)
    }

    /// Re-point the cursor after the projection changed, preferring `keep`.
    fn sync_selection(&mut self, keep: Option<Uuid>) {
        let view = self.state.view_items();
        let found = keep.is_some_and(|id| self.list.select_id(&view, id));
        if !found {
            self.list.clamp(view.len());
        }
    }

    fn report(&mut self, result: Result<Change, ServiceError>, done: impl Into<String>) -> bool {
        match result {
            Ok(_) => {
                self.status_message = Some(done.into());
                true
            }
            Err(e) if e.is_write_failure() => {
                self.status_message = Some(format!("Save failed: {e}"));
                true
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::NewItem { field } => self.handle_new_item(key, field),
            Mode::Edit { draft, field } => self.handle_edit(key, draft, field),
            Mode::ConfirmDelete { id, title } => self.handle_confirm_delete(key, id, title),
            Mode::Help => self.mode = Mode::Normal,
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        let selected = self.selected_id();
        match key.code {
            KeyCode::Char('n') => {
                self.mode = Mode::NewItem {
                    field: InputField::Title,
                };
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = selected {
                    let result = self.state.toggle_completed(id);
                    self.report(result, "Updated");
                    self.sync_selection(Some(id));
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(item) = selected.and_then(|id| self.state.item(id)) {
                    self.mode = Mode::Edit {
                        draft: EditDraft::from_item(item, self.state.today()),
                        field: InputField::Title,
                    };
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(item) = selected.and_then(|id| self.state.item(id)) {
                    self.mode = Mode::ConfirmDelete {
                        id: item.id,
                        title: item.title.clone(),
                    };
                }
            }
            KeyCode::Char('1') => self.apply_filter(Filter::All, selected),
            KeyCode::Char('2') => self.apply_filter(Filter::Active, selected),
            KeyCode::Char('3') => self.apply_filter(Filter::Completed, selected),
            KeyCode::Tab => self.apply_filter(self.state.filter().next(), selected),
            KeyCode::Char('s') => {
                let result = self.state.toggle_sort();
                let label = self.state.sort_label();
                self.report(result, format!("Sorted: {label}"));
                self.sync_selection(selected);
            }
            KeyCode::Char('J') => self.move_selected(selected, MoveDirection::Down),
            KeyCode::Char('K') => self.move_selected(selected, MoveDirection::Up),
            KeyCode::Char('w') => {
                if self.state.is_dirty() {
                    let result = self.state.retry_save();
                    self.report(result, "Saved");
                } else {
                    self.status_message = Some("Nothing to save".into());
                }
            }
            KeyCode::Char('?') => self.mode = Mode::Help,
            _ => {
                let len = self.state.view_items().len();
                self.list.handle_key(key, len);
            }
        }
    }

    fn apply_filter(&mut self, filter: Filter, selected: Option<Uuid>) {
        self.state.set_filter(filter);
        self.sync_selection(selected);
        self.status_message = Some(format!("Showing: {filter}"));
    }

    fn move_selected(&mut self, selected: Option<Uuid>, direction: MoveDirection) {
        let Some(id) = selected else { return };
        match self.state.move_in_view(id, direction) {
            Ok(Some(change)) => {
                self.report(Ok(change), "Moved");
            }
            Ok(None) => {}
            Err(e) => {
                self.report(Err(e), "Moved");
            }
        }
        self.sync_selection(Some(id));
    }

    fn handle_new_item(&mut self, key: KeyEvent, field: InputField) {
        match key.code {
            KeyCode::Enter => {
                let before = self.state.items().len();
                let result = self.state.add();
                let added = (self.state.items().len() > before)
                    .then(|| self.state.items().last().map(|i| i.id))
                    .flatten();
                self.report(result, "Task added");
                if added.is_some() {
                    self.mode = Mode::Normal;
                    self.sync_selection(added);
                }
            }
            KeyCode::Esc => {
                self.state.clear_input();
                self.mode = Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.mode = Mode::NewItem {
                    field: field.next(),
                };
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.clear_input();
            }
            KeyCode::Backspace => {
                self.state.input_mut(field).pop();
            }
            KeyCode::Char(c) => {
                self.state.input_mut(field).push(c);
            }
            _ => {}
        }
    }

    fn handle_edit(&mut self, key: KeyEvent, mut draft: EditDraft, field: InputField) {
        match key.code {
            KeyCode::Enter => {
                if !draft.is_valid() {
                    self.status_message = draft.error_message().map(str::to_string);
                    self.mode = Mode::Edit { draft, field };
                    return;
                }
                let id = draft.id();
                let result = self.state.edit(&draft);
                if self.report(result, "Task updated") {
                    self.mode = Mode::Normal;
                    self.sync_selection(Some(id));
                } else {
                    self.mode = Mode::Edit { draft, field };
                }
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Tab | KeyCode::BackTab => {
                self.mode = Mode::Edit {
                    draft,
                    field: field.next(),
                };
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                draft.clear(field);
                self.mode = Mode::Edit { draft, field };
            }
            KeyCode::Backspace => {
                draft.pop(field);
                self.mode = Mode::Edit { draft, field };
            }
            KeyCode::Char(c) => {
                draft.push(field, c);
                self.mode = Mode::Edit { draft, field };
            }
            _ => {}
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyEvent, id: Uuid, title: String) {
        if let KeyCode::Char('y') | KeyCode::Char('Y') = key.code {
            let result = self.state.delete(id);
            self.report(result, format!("Deleted: {title}"));
            self.sync_selection(None);
        }
        self.mode = Mode::Normal;
    }

    // -- Rendering --

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        let view = self.state.view_items();
        self.list.render(
            frame,
            layout[1],
            self.state.filter().display_name(),
            &view,
            self.state.today(),
        );
        self.render_status_bar(frame, layout[2]);

        // Overlays
        match &self.mode {
            Mode::Normal => {}
            Mode::NewItem { field } => self.render_form(
                frame,
                " New task ",
                self.state.input(InputField::Title),
                self.state.input(InputField::Due),
                *field,
                None,
                area,
            ),
            Mode::Edit { draft, field } => self.render_form(
                frame,
                " Edit task ",
                draft.field(InputField::Title),
                draft.field(InputField::Due),
                *field,
                draft.error_message(),
                area,
            ),
            Mode::ConfirmDelete { title, .. } => {
                self.render_confirm_delete_dialog(frame, title, area)
            }
            Mode::Help => self.render_help(frame, area),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(" todoapp ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(
                format!("Showing {}", self.state.filter()),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" | "),
            Span::styled(
                self.state.sort_label(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" | "),
            Span::styled(
                self.state.storage_path().display().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(title, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let saved_style = if self.state.is_dirty() {
            Style::default().fg(Color::Red).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.state.items_count_text()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(format!("{} ", self.state.status_text()), saved_style),
            Span::raw("|"),
        ];

        if let Some(ref msg) = self.status_message {
            spans.push(Span::styled(
                format!(" {msg}"),
                Style::default().fg(Color::Green),
            ));
            frame.render_widget(Line::from(spans), area);
            return;
        }

        let hints = match &self.mode {
            Mode::Normal => vec![
                ("q", "quit"),
                ("j/k", "nav"),
                ("n", "new"),
                ("space", "done"),
                ("e", "edit"),
                ("d", "del"),
                ("1/2/3", "filter"),
                ("s", "sort"),
                ("J/K", "move"),
                ("?", "help"),
            ],
            Mode::NewItem { .. } => vec![
                ("Tab", "field"),
                ("Enter", "add"),
                ("Ctrl+U", "clear"),
                ("Esc", "cancel"),
            ],
            Mode::Edit { .. } => vec![
                ("Tab", "field"),
                ("Enter", "save"),
                ("Ctrl+U", "clear field"),
                ("Esc", "cancel"),
            ],
            Mode::ConfirmDelete { .. } => vec![("y", "confirm"), ("any", "cancel")],
            Mode::Help => vec![("any", "close")],
        };

        spans.extend(hints.into_iter().flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {key}"), Style::default().fg(Color::Yellow).bold()),
                Span::raw(format!(" {desc} ")),
            ]
        }));

        frame.render_widget(Line::from(spans), area);
    }

    #[allow(clippy::too_many_arguments)]
    fn render_form(
        &self,
        frame: &mut Frame,
        label: &str,
        title: &str,
        due: &str,
        field: InputField,
        error: Option<&str>,
        area: Rect,
    ) {
        let popup = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup);

        let field_style = |f: InputField| {
            if f == field {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Title: ", Style::default().bold()),
                Span::styled(title.to_string(), field_style(InputField::Title)),
            ]),
            Line::from(vec![
                Span::styled("Due:   ", Style::default().bold()),
                Span::styled(due.to_string(), field_style(InputField::Due)),
            ]),
            Line::from(Span::styled(
                "       YYYY-MM-DD, today, tomorrow, +N, or empty",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        if let Some(error) = error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup);
    }

    fn render_confirm_delete_dialog(&self, frame: &mut Frame, title: &str, area: Rect) {
        let popup = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm Delete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let text = format!("Delete \"{title}\"?\n\n(y)es / (any key) cancel");
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 60, area);
        frame.render_widget(Clear, popup);

        let keys = [
            ("j/k, g/G", "move cursor"),
            ("n", "new task"),
            ("space, x", "toggle completed"),
            ("e, Enter", "edit title and due date"),
            ("d", "delete"),
            ("1 / 2 / 3", "show all / active / completed"),
            ("Tab", "next filter"),
            ("s", "sort by due date, again to flip"),
            ("J / K", "move task down / up"),
            ("w", "retry a failed save"),
            ("q", "quit"),
        ];
        let lines: Vec<Line> = keys
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("{key:>10}  "), Style::default().fg(Color::Yellow)),
                    Span::raw(*desc),
                ])
            })
            .collect();

        let block = Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
