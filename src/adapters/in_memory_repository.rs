//! In-memory value table repository for testing.
//!
//! Keeps MessagePack bytes in a shared map so tests exercise the same
//! serialization path without touching the file system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result, error::Error, ports::ValueTableRepository, q_learning::SavedValueTable,
};

/// In-memory repository for testing.
///
/// # Examples
///
/// ```
/// use gridlearn::adapters::InMemoryRepository;
/// use gridlearn::ports::ValueTableRepository;
/// use gridlearn::{SavedValueTable, TrainingMetadata, ValueTable};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let saved = SavedValueTable::new(ValueTable::zeros(16, 4), TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("lake"))?;
/// let loaded = repo.load(Path::new("lake"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), gridlearn::Error>(())
/// ```
///
/// # Thread Safety
///
/// Clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tables.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&key(path))
    }

    // A panicking writer cannot leave a half-written entry behind, so a
    // poisoned map is still consistent.
    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl ValueTableRepository for InMemoryRepository {
    fn save(&self, saved: &SavedValueTable, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize value table for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedValueTable> {
        let storage = self.storage();
        let bytes = storage.get(&key(path)).ok_or_else(|| Error::ModelNotFound {
            path: path.to_path_buf(),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize value table from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
