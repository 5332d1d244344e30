mod blocking;
mod controller;

pub use blocking::BlockingController;
pub use controller::TodoController;

use thiserror::Error;
use todoapp_core::TodoError;
use todoapp_store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("title cannot be empty")]
    InvalidTitle,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<TodoError> for ServiceError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::InvalidTitle => ServiceError::InvalidTitle,
            TodoError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
            TodoError::NotFound(msg) => ServiceError::NotFound(msg),
        }
    }
}

impl ServiceError {
    /// True when the in-memory change was applied but not written to disk.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, ServiceError::Storage(e) if !e.is_read_error())
    }
}
