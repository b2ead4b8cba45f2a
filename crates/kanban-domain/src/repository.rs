use kanban_core::KanbanResult;

use crate::{Column, Task};

/// Durable home of the two board collections.
///
/// `Ok(None)` means "nothing stored yet"; the store seeds defaults in that case.
#[cfg_attr(test, mockall::automock)]
pub trait BoardRepository {
    fn load_columns(&self) -> KanbanResult<Option<Vec<Column>>>;
    fn load_tasks(&self) -> KanbanResult<Option<Vec<Task>>>;
    fn save_columns(&mut self, columns: &[Column]) -> KanbanResult<()>;
    fn save_tasks(&mut self, tasks: &[Task]) -> KanbanResult<()>;
}

impl<R: BoardRepository + ?Sized> BoardRepository for Box<R> {
    fn load_columns(&self) -> KanbanResult<Option<Vec<Column>>> {
        (**self).load_columns()
    }

    fn load_tasks(&self) -> KanbanResult<Option<Vec<Task>>> {
        (**self).load_tasks()
    }

    fn save_columns(&mut self, columns: &[Column]) -> KanbanResult<()> {
        (**self).save_columns(columns)
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> KanbanResult<()> {
        (**self).save_tasks(tasks)
    }
}

/// Keeps the collections for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct SessionRepository {
    columns: Option<Vec<Column>>,
    tasks: Option<Vec<Task>>,
    saves: usize,
}

impl SessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves, across both collections.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl BoardRepository for SessionRepository {
    fn load_columns(&self) -> KanbanResult<Option<Vec<Column>>> {
        Ok(self.columns.clone())
    }

    fn load_tasks(&self) -> KanbanResult<Option<Vec<Task>>> {
        Ok(self.tasks.clone())
    }

    fn save_columns(&mut self, columns: &[Column]) -> KanbanResult<()> {
        self.columns = Some(columns.to_vec());
        self.saves += 1;
        Ok(())
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> KanbanResult<()> {
        self.tasks = Some(tasks.to_vec());
        self.saves += 1;
        Ok(())
    }
}
