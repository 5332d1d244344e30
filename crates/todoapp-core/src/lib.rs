pub mod change;
pub mod due;
pub mod error;
pub mod factory;
pub mod filter;
pub mod item;
pub mod sort;
pub mod validation;

pub use change::Change;
pub use error::TodoError;
pub use factory::TodoItemFactory;
pub use filter::Filter;
pub use item::TodoItem;
pub use sort::SortOrder;
