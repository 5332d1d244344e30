use std::fmt;

use crate::TodoItem;

/// Which items the projection shows. Exactly one filter is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn display_name(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// The filter after this one, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.is_completed,
            Filter::Completed => item.is_completed,
        }
    }

    /// Items passing the filter, in collection order.
    pub fn apply<'a>(&self, items: &'a [TodoItem]) -> Vec<&'a TodoItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
