use super::{Storage, StorageError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Volatile storage that keeps the last saved collection in memory.
///
/// Writes can be made to fail with [`MemoryStorage::set_unavailable`], which is how tests
/// exercise the store's rollback path.
pub struct MemoryStorage<T> {
    documents: Mutex<Vec<T>>,
    unavailable: AtomicBool,
}

impl<T: Clone> MemoryStorage<T> {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    /// Starts with `documents` already stored, as if loaded from a previous run.
    pub fn with_documents(documents: Vec<T>) -> Self {
        Self {
            documents: Mutex::new(documents),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// The collection as last saved.
    pub fn stored(&self) -> Vec<T> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<T>> {
        // The guarded value is a plain Vec, so a poisoned lock still holds usable data.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> Default for MemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Storage<T> for MemoryStorage<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory storage offline".into()));
        }
        Ok(self.stored())
    }

    async fn save(&self, documents: &[T]) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory storage offline".into()));
        }
        *self.lock() = documents.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
