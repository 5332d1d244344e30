use std::path::{Path, PathBuf};

use async_trait::async_trait;
use todoapp_core::TodoItem;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::{StoreConfig, StoreError, TodoStorage};

/// Stores the collection as one pretty-printed JSON array.
///
/// Saves go to a sibling temp file which is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact. Saves are
/// serialized through `write_lock`; the last writer wins.
pub struct JsonFileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(config: &StoreConfig) -> Self {
        Self::at(config.file_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| crate::FILE_NAME.to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    async fn write_atomic(&self, data: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Write(format!("mkdir {}: {e}", parent.display())))?;
        }

        let tmp = self.tmp_path();
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .map_err(|e| StoreError::Write(format!("create {}: {e}", tmp.display())))?;
        file.write_all(data)
            .await
            .map_err(|e| StoreError::Write(format!("write {}: {e}", tmp.display())))?;
        file.sync_all()
            .await
            .map_err(|e| StoreError::Write(format!("sync {}: {e}", tmp.display())))?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            StoreError::Write(format!(
                "rename {} -> {}: {e}",
                tmp.display(),
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl TodoStorage for JsonFileStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn try_load(&self) -> Result<Vec<TodoItem>, StoreError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Read(format!(
                    "read {}: {e}",
                    self.path.display()
                )))
            }
        };

        // A literal `null` is treated like an empty array.
        let items: Option<Vec<TodoItem>> = serde_json::from_slice(&data)
            .map_err(|e| StoreError::Parse(format!("{}: {e}", self.path.display())))?;
        let items = items.unwrap_or_default();
        debug!("loaded {} items from {}", items.len(), self.path.display());
        Ok(items)
    }

    async fn save(&self, items: &[TodoItem]) -> Result<(), StoreError> {
        let mut data =
            serde_json::to_vec_pretty(items).map_err(|e| StoreError::Serialize(e.to_string()))?;
        data.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.write_atomic(&data).await {
            error!("saving {} items failed: {e}", items.len());
            let _ = tokio::fs::remove_file(self.tmp_path()).await;
            return Err(e);
        }
        debug!("saved {} items to {}", items.len(), self.path.display());
        Ok(())
    }
}
