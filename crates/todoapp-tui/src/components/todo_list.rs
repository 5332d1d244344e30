use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use todoapp_core::due::format_day;
use todoapp_core::TodoItem;
use uuid::Uuid;

/// Cursor over the projection. The items themselves live in the
/// presentation state; this only tracks which row is highlighted.
#[derive(Debug, Default)]
pub struct TodoList {
    list_state: ListState,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Returns the highlighted item of `view`, if any.
    pub fn selected_item<'a>(&self, view: &[&'a TodoItem]) -> Option<&'a TodoItem> {
        view.get(self.list_state.selected()?).copied()
    }

    /// Select the row showing `id`. Returns `false` and leaves the cursor
    /// alone when the item is not in `view`.
    pub fn select_id(&mut self, view: &[&TodoItem], id: Uuid) -> bool {
        match view.iter().position(|i| i.id == id) {
            Some(idx) => {
                self.list_state.select(Some(idx));
                true
            }
            None => false,
        }
    }

    /// Keep the cursor on a valid row after the view changed length.
    pub fn clamp(&mut self, len: usize) {
        let selected = match (len, self.list_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(idx)) => Some(idx.min(len - 1)),
        };
        self.list_state.select(selected);
    }

    pub fn handle_key(&mut self, key: KeyEvent, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if current + 1 < len {
                    self.list_state.select(Some(current + 1));
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list_state.select(Some(current.saturating_sub(1)));
            }
            // Jump to first/last
            KeyCode::Char('g') | KeyCode::Home => self.list_state.select(Some(0)),
            KeyCode::Char('G') | KeyCode::End => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        view: &[&TodoItem],
        today: NaiveDate,
    ) {
        let block = Block::default()
            .title(format!(" {title} ({}) ", view.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let rows: Vec<ListItem> = view.iter().map(|item| row(item, today)).collect();

        let list = List::new(rows)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
            .highlight_symbol("> ");

        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn row(item: &TodoItem, today: NaiveDate) -> ListItem<'static> {
    let overdue = item.is_overdue_on(today);
    let checkbox = if item.is_completed { "[x] " } else { "[ ] " };

    let title_style = if item.is_completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if overdue {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(checkbox, Style::default().fg(Color::Cyan)),
        Span::styled(item.title.clone(), title_style),
    ];
    if let Some(day) = item.due_day() {
        spans.push(Span::styled(
            format!("  due {}", format_day(day)),
            due_style(item.is_completed, overdue),
        ));
    }
    if overdue {
        spans.push(Span::styled(" (overdue)", Style::default().fg(Color::Red).bold()));
    }
    ListItem::new(Line::from(spans))
}

fn due_style(completed: bool, overdue: bool) -> Style {
    match (completed, overdue) {
        (true, _) => Style::default().fg(Color::DarkGray),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::Yellow),
    }
}
