use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{seed, Column, ColumnId, Task, TaskId};

/// The two ordered collections that make up a board.
///
/// Task order is global: a column's visible order is the task sequence
/// filtered by `column_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    pub fn seeded() -> Self {
        Self::new(seed::default_columns(), seed::default_tasks())
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.column(id).is_some()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn task_index(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    pub fn tasks_in_column<'a>(&'a self, column_id: &'a ColumnId) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| &t.column_id == column_id)
    }

    /// Checks unique ids and that every task points at an existing column.
    pub fn check_integrity(&self) -> KanbanResult<()> {
        check_columns(&self.columns)?;
        check_tasks(&self.tasks, &self.columns)
    }
}

pub(crate) fn check_columns(columns: &[Column]) -> KanbanResult<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(&column.id) {
            return Err(KanbanError::Validation(format!(
                "duplicate column id {}",
                column.id
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_tasks(tasks: &[Task], columns: &[Column]) -> KanbanResult<()> {
    let column_ids: HashSet<&ColumnId> = columns.iter().map(|c| &c.id).collect();
    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(&task.id) {
            return Err(KanbanError::Validation(format!("duplicate task id {}", task.id)));
        }
        if !column_ids.contains(&task.column_id) {
            return Err(KanbanError::Validation(format!(
                "task {} references missing column {}",
                task.id, task.column_id
            )));
        }
    }
    Ok(())
}

/// True when both slices hold exactly the same ids, ignoring order.
pub(crate) fn same_ids<'a, I, J>(left: I, right: J) -> bool
where
    I: IntoIterator<Item = &'a crate::Id>,
    J: IntoIterator<Item = &'a crate::Id>,
{
    let left: Vec<&crate::Id> = left.into_iter().collect();
    let right: Vec<&crate::Id> = right.into_iter().collect();
    if left.len() != right.len() {
        return false;
    }
    let left_set: HashSet<&crate::Id> = left.iter().copied().collect();
    let right_set: HashSet<&crate::Id> = right.iter().copied().collect();
    left_set.len() == left.len() && right_set.len() == right.len() && left_set == right_set
}
