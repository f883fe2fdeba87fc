use super::{Storage, StorageError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists a collection as a pretty-printed JSON array in a single file.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a crash
/// mid-write leaves the previous collection intact.
pub struct JsonFileStorage<T> {
    path: PathBuf,
    _documents: PhantomData<fn() -> T>,
}

impl<T> JsonFileStorage<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _documents: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T> Storage<T> for JsonFileStorage<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "Collection file not found, starting empty");
            return Ok(Vec::new());
        }

        let contents = tokio::fs::read_to_string(&self.path).await?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    async fn save(&self, documents: &[T]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(documents)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), size = documents.len(), "Flushed collection");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
