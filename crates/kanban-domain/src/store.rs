//! Board State Store.
//!
//! Owns the canonical column and task sequences. Every mutation goes through
//! this type and is followed by a write of the touched collection. Storage is
//! a best-effort cache: load and save failures are logged and the in-memory
//! board stays authoritative for the session.

use kanban_core::config::DEFAULT_FALLBACK_COLUMN;
use kanban_core::{KanbanError, KanbanResult};

use crate::board::{check_columns, check_tasks, same_ids};
use crate::task::dedup_tags;
use crate::{seed, Board, BoardRepository, Column, ColumnId, Id, NewTask, Task, TaskId, TaskUpdate};

pub struct BoardStore<R: BoardRepository> {
    board: Board,
    repository: R,
    fallback_column: ColumnId,
}

impl<R: BoardRepository> BoardStore<R> {
    /// Loads both collections, seeding whichever is absent or unreadable.
    /// Never fails.
    pub fn initialize(repository: R) -> Self {
        let columns = loaded_or_default("columns", repository.load_columns(), seed::default_columns);
        let tasks = loaded_or_default("tasks", repository.load_tasks(), seed::default_tasks);

        let mut board = Board::new(columns, tasks);
        let reseeded = match board.check_integrity() {
            Ok(()) => false,
            Err(e) => {
                tracing::warn!("Stored board is inconsistent ({}); falling back to defaults", e);
                board = Board::seeded();
                true
            }
        };

        tracing::debug!(
            "Board initialized with {} columns and {} tasks",
            board.columns.len(),
            board.tasks.len()
        );

        let mut store = Self {
            board,
            repository,
            fallback_column: Id::from(DEFAULT_FALLBACK_COLUMN),
        };
        // Both keys are overwritten so the next load sees a consistent pair.
        if reseeded {
            store.persist_columns();
            store.persist_tasks();
        }
        store
    }

    /// Column used by `create_task` when none (or an unknown one) is requested.
    pub fn with_fallback_column(mut self, column_id: impl Into<ColumnId>) -> Self {
        self.fallback_column = column_id.into();
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn columns(&self) -> &[Column] {
        &self.board.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.board.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.board.task(id)
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.board.column(id)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    pub fn create_task(&mut self, new: NewTask) -> KanbanResult<Task> {
        let column_id = self.resolve_column(new.column_id.as_ref())?;

        let mut task = Task::new(column_id, new.content);
        while self.board.task(&task.id).is_some() {
            task.id = Id::generate();
        }
        task.description = new.description.filter(|d| !d.trim().is_empty());
        task.priority = new.priority.unwrap_or_default();
        task.tags = dedup_tags(new.tags);
        task.due_date = new.due_date;

        tracing::info!("Creating task: {} (id: {}) in {}", task.content, task.id, task.column_id);
        self.board.tasks.push(task.clone());
        self.persist_tasks();
        Ok(task)
    }

    /// Merges `update` into the task. Returns `None` when the id is unknown.
    pub fn update_task(&mut self, id: &TaskId, update: TaskUpdate) -> Option<Task> {
        let Some(task) = self.board.tasks.iter_mut().find(|t| &t.id == id) else {
            tracing::debug!("Ignoring update for unknown task {}", id);
            return None;
        };

        let before = task.clone();
        task.apply(update);
        let updated = task.clone();

        if updated != before {
            tracing::info!("Updated task {}", id);
            self.persist_tasks();
        }
        Some(updated)
    }

    /// Removes the task. Deleting an unknown id is a no-op.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.board.tasks.len();
        self.board.tasks.retain(|t| &t.id != id);
        if self.board.tasks.len() == before {
            return false;
        }
        tracing::info!("Deleted task {}", id);
        self.persist_tasks();
        true
    }

    pub fn create_column(&mut self, title: impl Into<String>) -> Column {
        let mut column = Column::new(title);
        while self.board.has_column(&column.id) {
            column.id = Id::generate();
        }
        tracing::info!("Creating column: {} (id: {})", column.title, column.id);
        self.board.columns.push(column.clone());
        self.persist_columns();
        column
    }

    /// Replaces the task sequence wholesale.
    ///
    /// The new sequence must hold exactly the current task ids and reference
    /// only existing columns. Returns whether anything changed.
    pub fn reorder_tasks(&mut self, sequence: Vec<Task>) -> KanbanResult<bool> {
        if !same_ids(
            self.board.tasks.iter().map(|t| &t.id),
            sequence.iter().map(|t| &t.id),
        ) {
            return Err(KanbanError::Validation(
                "task sequence must contain exactly the current tasks".to_string(),
            ));
        }
        check_tasks(&sequence, &self.board.columns)?;

        if sequence == self.board.tasks {
            return Ok(false);
        }
        self.board.tasks = sequence;
        self.persist_tasks();
        Ok(true)
    }

    /// Points a task at another column without moving it in the sequence.
    pub fn reassign_task_column(&mut self, task_id: &TaskId, column_id: &ColumnId) -> KanbanResult<bool> {
        if !self.board.has_column(column_id) {
            return Err(KanbanError::not_found("column", column_id));
        }
        let Some(task) = self.board.tasks.iter_mut().find(|t| &t.id == task_id) else {
            return Ok(false);
        };
        if &task.column_id == column_id {
            return Ok(false);
        }
        task.column_id = column_id.clone();
        self.persist_tasks();
        Ok(true)
    }

    /// Replaces the column sequence wholesale; ids must match the current set.
    pub fn reorder_columns(&mut self, sequence: Vec<Column>) -> KanbanResult<bool> {
        if !same_ids(
            self.board.columns.iter().map(|c| &c.id),
            sequence.iter().map(|c| &c.id),
        ) {
            return Err(KanbanError::Validation(
                "column sequence must contain exactly the current columns".to_string(),
            ));
        }
        check_columns(&sequence)?;

        if sequence == self.board.columns {
            return Ok(false);
        }
        tracing::info!(
            "Reordered columns: {}",
            sequence.iter().map(|c| c.id.as_str()).collect::<Vec<_>>().join(", ")
        );
        self.board.columns = sequence;
        self.persist_columns();
        Ok(true)
    }

    /// Swaps in a complete board, e.g. the snapshot taken when a drag started.
    pub fn restore(&mut self, board: Board) -> KanbanResult<()> {
        board.check_integrity()?;
        let Board { columns, tasks } = board;
        if columns != self.board.columns {
            self.board.columns = columns;
            self.persist_columns();
        }
        if tasks != self.board.tasks {
            self.board.tasks = tasks;
            self.persist_tasks();
        }
        Ok(())
    }

    fn resolve_column(&self, requested: Option<&ColumnId>) -> KanbanResult<ColumnId> {
        if let Some(id) = requested {
            if self.board.has_column(id) {
                return Ok(id.clone());
            }
            tracing::warn!("Column {} does not exist; using fallback", id);
        }
        if self.board.has_column(&self.fallback_column) {
            return Ok(self.fallback_column.clone());
        }
        self.board
            .columns
            .first()
            .map(|c| c.id.clone())
            .ok_or_else(|| KanbanError::NotFound("board has no columns".to_string()))
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = self.repository.save_tasks(&self.board.tasks) {
            tracing::error!("Failed to persist tasks: {}", e);
        }
    }

    fn persist_columns(&mut self) {
        if let Err(e) = self.repository.save_columns(&self.board.columns) {
            tracing::error!("Failed to persist columns: {}", e);
        }
    }
}

fn loaded_or_default<T>(
    what: &str,
    loaded: KanbanResult<Option<Vec<T>>>,
    default: impl FnOnce() -> Vec<T>,
) -> Vec<T> {
    match loaded {
        Ok(Some(items)) => items,
        Ok(None) => {
            tracing::debug!("No stored {}; using defaults", what);
            default()
        }
        Err(e) => {
            tracing::warn!("Could not load {} ({}); using defaults", what, e);
            default()
        }
    }
}
