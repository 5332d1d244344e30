mod json;
mod memory;

pub use json::JsonFileStorage;
pub use memory::MemoryStorage;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use todoapp_core::TodoItem;
use tracing::warn;
use uuid::Uuid;

pub const FILE_NAME: &str = "todos.json";
pub const APP_DIR_NAME: &str = "TodoApp";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("read error: {0}")]
    Read(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("serialize error: {0}")]
    Serialize(String),
}

impl StoreError {
    /// Read-side failures are recoverable: the caller sees an empty collection.
    pub fn is_read_error(&self) -> bool {
        matches!(self, StoreError::Read(_) | StoreError::Parse(_))
    }
}

/// Durable snapshot of the whole item collection.
#[async_trait]
pub trait TodoStorage: Send + Sync {
    /// Where the snapshot lives, for display.
    fn path(&self) -> &Path;

    /// Read the snapshot. A missing snapshot is an empty collection, not an error.
    async fn try_load(&self) -> Result<Vec<TodoItem>, StoreError>;

    /// Read the snapshot, treating any read failure as an empty collection.
    async fn load(&self) -> Vec<TodoItem> {
        match self.try_load().await {
            Ok(items) => repair(items),
            Err(e) => {
                warn!("{}: {e}; starting with an empty list", self.path().display());
                Vec::new()
            }
        }
    }

    /// Replace the snapshot with `items`.
    async fn save(&self, items: &[TodoItem]) -> Result<(), StoreError>;
}

/// Enforce the collection invariant on freshly read data: trimmed non-empty
/// titles and unique ids.
pub fn repair(items: Vec<TodoItem>) -> Vec<TodoItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for mut item in items {
        let trimmed = item.title.trim();
        if trimmed.is_empty() {
            warn!("dropping item {} with an empty title", item.id);
            continue;
        }
        if trimmed.len() != item.title.len() {
            item.title = trimmed.to_string();
        }
        if !seen.insert(item.id) {
            let fresh = Uuid::new_v4();
            warn!("duplicate id {} on \"{}\"; reassigned {fresh}", item.id, item.title);
            item.id = fresh;
            seen.insert(fresh);
        }
        out.push(item);
    }
    out
}

// -- Configuration --

/// Where the JSON snapshot is kept.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Directory holding `todos.json`. When `None`, the platform
    /// application-data directory is used.
    pub data_dir: Option<PathBuf>,
}

impl StoreConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn file_path(&self) -> PathBuf {
        self.data_dir().join(FILE_NAME)
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

pub fn create_storage(config: &StoreConfig) -> Arc<dyn TodoStorage> {
    Arc::new(JsonFileStorage::new(config))
}
