use uuid::Uuid;

use crate::{Filter, SortOrder};

/// What a mutating operation did to the collection or the view.
///
/// Callers recompute derived values (projection, counts) from the
/// collection after receiving one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The whole collection was replaced, e.g. after loading or saving it wholesale.
    Replaced { len: usize },
    Added { id: Uuid, index: usize },
    Removed { id: Uuid, index: usize },
    /// The item was removed by someone else before the operation ran.
    Missing { id: Uuid },
    Updated { id: Uuid },
    Moved { id: Uuid, from: usize, to: usize },
    Sorted(SortOrder),
    FilterChanged(Filter),
}
