pub mod envelope;
pub mod local_storage;
pub mod store;

pub use envelope::{CollectionEnvelope, Decoded, FormatVersion};
pub use local_storage::{LocalStorageRepository, COLUMNS_KEY, TASKS_KEY};
pub use store::*;

use kanban_core::KanbanResult;
use kanban_domain::BoardStore;
use std::path::Path;

/// Repository writing each collection to `<dir>/<key>.json`.
pub type FileRepository = LocalStorageRepository<FileKeyValueStore>;

pub fn open_file_repository(dir: impl AsRef<Path>) -> KanbanResult<FileRepository> {
    Ok(LocalStorageRepository::new(FileKeyValueStore::open(dir)?))
}

/// Opens the file-backed board in `dir`, loading or seeding it.
pub fn open_board_store(
    dir: impl AsRef<Path>,
    fallback_column: &str,
) -> KanbanResult<BoardStore<FileRepository>> {
    let repository = open_file_repository(dir)?;
    Ok(BoardStore::initialize(repository).with_fallback_column(fallback_column))
}
