use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use todoapp_core::TodoItem;

use crate::{StoreError, TodoStorage};

/// Keeps the snapshot in memory. Used by tests and by callers that do not
/// want anything on disk.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<Vec<TodoItem>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Make every following `save` fail until switched off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.items.lock().map(|items| items.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TodoStorage for MemoryStorage {
    fn path(&self) -> &Path {
        Path::new("(memory)")
    }

    async fn try_load(&self) -> Result<Vec<TodoItem>, StoreError> {
        self.items
            .lock()
            .map(|items| items.clone())
            .map_err(|_| StoreError::Read("lock poisoned".into()))
    }

    async fn save(&self, items: &[TodoItem]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("writes disabled".into()));
        }
        let mut stored = self
            .items
            .lock()
            .map_err(|_| StoreError::Write("lock poisoned".into()))?;
        *stored = items.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
