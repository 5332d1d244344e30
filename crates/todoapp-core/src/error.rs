use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("title cannot be empty")]
    InvalidTitle,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),
}
