//! Board repository over a string key-value backend.

use kanban_core::{KanbanResult, KeyValueStore};
use kanban_domain::{BoardRepository, Column, Task};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{decode, encode, FormatVersion};

pub const COLUMNS_KEY: &str = "kanban-columns";
pub const TASKS_KEY: &str = "kanban-tasks";

/// Stores columns and tasks under two independent keys, each as a
/// versioned envelope.
#[derive(Debug, Clone)]
pub struct LocalStorageRepository<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> LocalStorageRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> KanbanResult<Option<Vec<T>>> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };
        let decoded = decode::<T>(&raw)?;
        if decoded.version != FormatVersion::CURRENT {
            tracing::info!(
                "Upgrading {} from format version {} to {}",
                key,
                decoded.version.as_u32(),
                FormatVersion::CURRENT.as_u32()
            );
        }
        tracing::debug!("Loaded {} items from {}", decoded.items.len(), key);
        Ok(Some(decoded.items))
    }

    fn save<T: Serialize>(&mut self, key: &str, items: &[T]) -> KanbanResult<()> {
        let raw = encode(items)?;
        self.storage.set(key, &raw)?;
        tracing::debug!("Saved {} items to {}", items.len(), key);
        Ok(())
    }
}

impl<S: KeyValueStore> BoardRepository for LocalStorageRepository<S> {
    fn load_columns(&self) -> KanbanResult<Option<Vec<Column>>> {
        self.load(COLUMNS_KEY)
    }

    fn load_tasks(&self) -> KanbanResult<Option<Vec<Task>>> {
        self.load(TASKS_KEY)
    }

    fn save_columns(&mut self, columns: &[Column]) -> KanbanResult<()> {
        self.save(COLUMNS_KEY, columns)
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> KanbanResult<()> {
        self.save(TASKS_KEY, tasks)
    }
}
