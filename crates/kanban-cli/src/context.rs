use kanban_core::{AppConfig, KanbanError, KanbanResult};
use kanban_domain::ordering::array_move;
use kanban_domain::{
    BoardStore, Column, ContentSearcher, DragController, DragItem, EntityKind, Id, Task,
    TaskSearcher,
};
use kanban_persistence::{open_board_store, FileRepository};
use serde::Serialize;
use std::path::Path;

/// Where a dragged task ended up.
#[derive(Debug, Clone, Serialize)]
pub struct DragResult {
    pub task: Task,
    pub index: usize,
    pub moved: bool,
}

pub struct CliContext {
    pub store: BoardStore<FileRepository>,
}

impl CliContext {
    pub fn open(data_dir: &Path, config: &AppConfig) -> KanbanResult<Self> {
        tracing::debug!("Opening board in {}", data_dir.display());
        let store = open_board_store(data_dir, config.effective_default_column())?;
        Ok(Self { store })
    }

    pub fn list_tasks(&self, column_id: Option<&str>, query: Option<&str>) -> Vec<Task> {
        let searcher = ContentSearcher::new(query.unwrap_or_default());
        self.store
            .tasks()
            .iter()
            .filter(|t| column_id.map_or(true, |c| t.column_id == c))
            .filter(|t| searcher.matches(t))
            .cloned()
            .collect()
    }

    pub fn get_task(&self, id: &str) -> KanbanResult<Task> {
        self.store
            .task(&Id::from(id))
            .cloned()
            .ok_or_else(|| KanbanError::not_found("Task", id))
    }

    pub fn reorder_column(&mut self, id: &str, position: usize) -> KanbanResult<Vec<Column>> {
        let id = Id::from(id);
        let from = self
            .store
            .board()
            .column_index(&id)
            .ok_or_else(|| KanbanError::not_found("Column", &id))?;
        let mut columns = self.store.columns().to_vec();
        let to = position.min(columns.len().saturating_sub(1));
        array_move(&mut columns, from, to);
        self.store.reorder_columns(columns)?;
        Ok(self.store.columns().to_vec())
    }

    /// Runs a full drag gesture for one task: start, hover over `over`, drop.
    pub fn drag_task(&mut self, id: &str, over: DragItem) -> KanbanResult<DragResult> {
        let item = DragItem::task(id);
        let mut drag = DragController::new();
        if !drag.drag_start(&self.store, item.clone()) {
            return Err(KanbanError::not_found("Task", id));
        }
        let exists = match over.kind {
            EntityKind::Task => self.store.task(&over.id).is_some(),
            EntityKind::Column => self.store.column(&over.id).is_some(),
        };
        if !exists {
            drag.drag_cancel(&mut self.store);
            return Err(KanbanError::NotFound(over.to_string()));
        }

        drag.drag_over(&mut self.store, Some(&over));
        let outcome = drag.drag_end(&mut self.store, Some(&over));

        let task = self.get_task(id)?;
        let index = self
            .store
            .board()
            .task_index(&item.id)
            .ok_or_else(|| KanbanError::Internal(format!("Task {} vanished during drag", id)))?;
        Ok(DragResult {
            task,
            index,
            moved: outcome.is_change(),
        })
    }
}
