//! Sequence relocation primitives shared by pointer and keyboard dragging.

use crate::{ColumnId, Task};

/// Moves the element at `from` so it ends up at index `to`, shifting the
/// elements in between by one. Other elements keep their relative order.
///
/// Returns `false` without touching `items` when either index is out of range.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

/// Index at which a task joins the end of `column_id`'s run, computed on a
/// sequence that no longer contains the task itself.
pub fn end_of_column_run(tasks: &[Task], column_id: &ColumnId) -> usize {
    tasks
        .iter()
        .rposition(|t| &t.column_id == column_id)
        .map(|last| last + 1)
        .unwrap_or(tasks.len())
}

/// Reassigns the task at `from` to `column_id` and places it right after the
/// last task already in that column, or at the end of the sequence when the
/// column holds nothing else.
pub fn relocate_to_column_end(tasks: &mut Vec<Task>, from: usize, column_id: &ColumnId) -> Option<usize> {
    if from >= tasks.len() {
        return None;
    }
    let mut task = tasks.remove(from);
    task.column_id = column_id.clone();
    let to = end_of_column_run(tasks, column_id);
    tasks.insert(to, task);
    Some(to)
}
