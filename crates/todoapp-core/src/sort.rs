use std::cmp::Ordering;
use std::fmt;

use crate::TodoItem;

/// Due-date ordering of the collection.
///
/// Dated items come first, ordered by due day in the chosen direction with
/// ties broken by title. Undated items always follow, ordered by title,
/// whichever direction is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Due Date (Earliest First)",
            SortOrder::Descending => "Due Date (Latest First)",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn compare(&self, a: &TodoItem, b: &TodoItem) -> Ordering {
        match (a.due_day(), b.due_day()) {
            (Some(da), Some(db)) => {
                let by_day = match self {
                    SortOrder::Ascending => da.cmp(&db),
                    SortOrder::Descending => db.cmp(&da),
                };
                by_day.then_with(|| a.title.cmp(&b.title))
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.title.cmp(&b.title),
        }
    }

    /// Stable in-place sort.
    pub fn sort(&self, items: &mut [TodoItem]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    pub fn sorted(&self, items: impl IntoIterator<Item = TodoItem>) -> Vec<TodoItem> {
        let mut items: Vec<TodoItem> = items.into_iter().collect();
        self.sort(&mut items);
        items
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
