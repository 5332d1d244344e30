use std::path::Path;
use std::sync::Arc;

use todoapp_core::{validation, Change, TodoError, TodoItem};
use todoapp_store::TodoStorage;
use tracing::debug;
use uuid::Uuid;

use crate::ServiceError;

/// Applies list mutations to a caller-owned collection and writes the whole
/// resulting collection through to storage.
///
/// The controller holds no items of its own. When a save fails the
/// caller's list keeps the change and the error is returned; memory and
/// disk stay apart until the next successful save.
pub struct TodoController {
    storage: Arc<dyn TodoStorage>,
}

impl TodoController {
    pub fn new(storage: Arc<dyn TodoStorage>) -> Self {
        Self { storage }
    }

    pub fn storage_path(&self) -> &Path {
        self.storage.path()
    }

    pub async fn load(&self) -> Vec<TodoItem> {
        self.storage.load().await
    }

    pub async fn save(&self, items: &[TodoItem]) -> Result<Change, ServiceError> {
        self.storage.save(items).await?;
        Ok(Change::Replaced { len: items.len() })
    }

    pub async fn add(
        &self,
        items: &mut Vec<TodoItem>,
        item: TodoItem,
    ) -> Result<Change, ServiceError> {
        validation::validate_title(Some(item.title.as_str()))?;
        if items.iter().any(|i| i.id == item.id) {
            return Err(ServiceError::InvalidInput(format!(
                "duplicate id {}",
                item.id
            )));
        }

        let id = item.id;
        items.push(item);
        let index = items.len() - 1;
        debug!("added {id} at {index}");
        self.storage.save(items).await?;
        Ok(Change::Added { id, index })
    }

    /// Remove the item with `id`. Removing an absent item still rewrites
    /// the snapshot.
    pub async fn delete(
        &self,
        items: &mut Vec<TodoItem>,
        id: Uuid,
    ) -> Result<Change, ServiceError> {
        let change = match items.iter().position(|i| i.id == id) {
            Some(index) => {
                items.remove(index);
                debug!("removed {id} from {index}");
                Change::Removed { id, index }
            }
            None => Change::Missing { id },
        };
        self.storage.save(items).await?;
        Ok(change)
    }

    /// Persist an item the caller has already modified in place.
    pub async fn update(&self, items: &[TodoItem], id: Uuid) -> Result<Change, ServiceError> {
        let item = items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        validation::validate_title(Some(item.title.as_str()))?;
        self.storage.save(items).await?;
        Ok(Change::Updated { id })
    }

    pub async fn reorder(
        &self,
        items: &mut Vec<TodoItem>,
        old_index: usize,
        new_index: usize,
    ) -> Result<Change, ServiceError> {
        let len = items.len();
        if old_index >= len || new_index >= len {
            return Err(ServiceError::InvalidInput(format!(
                "cannot move {old_index} to {new_index} in a list of {len}"
            )));
        }

        let item = items.remove(old_index);
        let id = item.id;
        items.insert(new_index, item);
        self.storage.save(items).await?;
        Ok(Change::Moved {
            id,
            from: old_index,
            to: new_index,
        })
    }
}
