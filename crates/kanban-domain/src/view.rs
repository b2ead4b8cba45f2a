//! Read-only projection of a board through a search predicate.

use crate::{Board, ColumnId, Task, TaskSearcher};

pub struct BoardView<'a, S: TaskSearcher + ?Sized> {
    board: &'a Board,
    searcher: &'a S,
}

impl<'a, S: TaskSearcher + ?Sized> BoardView<'a, S> {
    pub fn new(board: &'a Board, searcher: &'a S) -> Self {
        Self { board, searcher }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Matching tasks in global sequence order.
    pub fn tasks(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.board.tasks.iter().filter(|t| self.searcher.matches(t))
    }

    /// Matching tasks of one column, in the column's visible order.
    pub fn column_tasks<'b>(&'b self, column_id: &'b ColumnId) -> impl Iterator<Item = &'a Task> + 'b {
        self.tasks().filter(move |t| &t.column_id == column_id)
    }

    pub fn column_count(&self, column_id: &ColumnId) -> usize {
        self.column_tasks(column_id).count()
    }
}
