use crate::store::atomic_writer::AtomicWriter;
use kanban_core::{KanbanError, KanbanResult, KeyValueStore};
use std::path::{Path, PathBuf};

/// Key-value storage backed by one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Opens (creating if needed) the storage directory.
    pub fn open(dir: impl AsRef<Path>) -> KanbanResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!("Using storage directory {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> KanbanResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(KanbanError::Validation(format!("invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> KanbanResult<Option<String>> {
        AtomicWriter::read_to_string(&self.path_for(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> KanbanResult<()> {
        AtomicWriter::write_atomic(&self.path_for(key)?, value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> KanbanResult<()> {
        match std::fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
