use std::path::Path;
use std::sync::Arc;

use todoapp_core::{Change, TodoItem};
use todoapp_store::TodoStorage;
use tokio::runtime::Runtime;
use uuid::Uuid;

use crate::{ServiceError, TodoController};

/// Blocking wrapper around the async `TodoController`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the TUI.
pub struct BlockingController {
    inner: TodoController,
    rt: Runtime,
}

impl BlockingController {
    pub fn new(storage: Arc<dyn TodoStorage>) -> Self {
        Self {
            inner: TodoController::new(storage),
            rt: Runtime::new().expect("failed to create tokio runtime"),
        }
    }

    pub fn storage_path(&self) -> &Path {
        self.inner.storage_path()
    }

    pub fn load(&self) -> Vec<TodoItem> {
        self.rt.block_on(self.inner.load())
    }

    pub fn save(&self, items: &[TodoItem]) -> Result<Change, ServiceError> {
        self.rt.block_on(self.inner.save(items))
    }

    pub fn add(&self, items: &mut Vec<TodoItem>, item: TodoItem) -> Result<Change, ServiceError> {
        self.rt.block_on(self.inner.add(items, item))
    }

    pub fn delete(&self, items: &mut Vec<TodoItem>, id: Uuid) -> Result<Change, ServiceError> {
        self.rt.block_on(self.inner.delete(items, id))
    }

    pub fn update(&self, items: &[TodoItem], id: Uuid) -> Result<Change, ServiceError> {
        self.rt.block_on(self.inner.update(items, id))
    }

    pub fn reorder(
        &self,
        items: &mut Vec<TodoItem>,
        old_index: usize,
        new_index: usize,
    ) -> Result<Change, ServiceError> {
        self.rt.block_on(self.inner.reorder(items, old_index, new_index))
    }
}
