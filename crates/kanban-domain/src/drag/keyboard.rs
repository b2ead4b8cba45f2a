use crate::{Board, Task, TaskSearcher};

use super::{DragItem, EntityKind};

/// Arrow keys in keyboard sorting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Up,
    Down,
    Left,
    Right,
}

/// Resolves the target the picked-up item should be "over" after one key
/// press, or `None` when it cannot move further that way.
///
/// Tasks step over their visible neighbours with Up/Down and jump to the
/// adjacent column with Left/Right. Columns step from wherever the previous
/// key press left them.
pub fn keyboard_target<S: TaskSearcher + ?Sized>(
    board: &Board,
    active: &DragItem,
    current_over: Option<&DragItem>,
    key: SortKey,
    searcher: &S,
) -> Option<DragItem> {
    match active.kind {
        EntityKind::Task => task_target(board, active, key, searcher),
        EntityKind::Column => column_target(board, active, current_over, key),
    }
}

fn task_target<S: TaskSearcher + ?Sized>(
    board: &Board,
    active: &DragItem,
    key: SortKey,
    searcher: &S,
) -> Option<DragItem> {
    let task = board.task(&active.id)?;
    match key {
        SortKey::Up | SortKey::Down => {
            let visible: Vec<&Task> = board
                .tasks_in_column(&task.column_id)
                .filter(|t| t.id == task.id || searcher.matches(t))
                .collect();
            let pos = visible.iter().position(|t| t.id == task.id)?;
            let neighbour = match key {
                SortKey::Up => pos.checked_sub(1).and_then(|i| visible.get(i)),
                _ => visible.get(pos + 1),
            }?;
            Some(DragItem::task(neighbour.id.clone()))
        }
        SortKey::Left | SortKey::Right => {
            let index = board.column_index(&task.column_id)?;
            let target = step(index, key, board.columns.len())?;
            Some(DragItem::column(board.columns[target].id.clone()))
        }
    }
}

fn column_target(
    board: &Board,
    active: &DragItem,
    current_over: Option<&DragItem>,
    key: SortKey,
) -> Option<DragItem> {
    let from = current_over
        .and_then(|over| match over.kind {
            EntityKind::Column => board.column_index(&over.id),
            EntityKind::Task => board
                .task(&over.id)
                .and_then(|t| board.column_index(&t.column_id)),
        })
        .or_else(|| board.column_index(&active.id))?;
    let target = step(from, key, board.columns.len())?;
    Some(DragItem::column(board.columns[target].id.clone()))
}

fn step(index: usize, key: SortKey, len: usize) -> Option<usize> {
    match key {
        SortKey::Left | SortKey::Up => index.checked_sub(1),
        SortKey::Right | SortKey::Down => Some(index + 1).filter(|&i| i < len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentSearcher, Id};

    fn board() -> Board {
        let mut board = Board::seeded();
        let mut task = Task::new(Id::from("todo"), "Draft release notes");
        task.id = Id::from("3");
        board.tasks.push(task);
        board
    }

    fn all() -> ContentSearcher {
        ContentSearcher::new("")
    }

    #[test]
    fn test_task_up_down_steps_over_neighbours() {
        let board = board();
        let active = DragItem::task("2");
        assert_eq!(
            keyboard_target(&board, &active, None, SortKey::Up, &all()),
            Some(DragItem::task("1"))
        );
        assert_eq!(
            keyboard_target(&board, &active, None, SortKey::Down, &all()),
            Some(DragItem::task("3"))
        );
        assert_eq!(
            keyboard_target(&board, &DragItem::task("1"), None, SortKey::Up, &all()),
            None
        );
    }

    #[test]
    fn test_task_skips_filtered_neighbours() {
        let board = board();
        let searcher = ContentSearcher::new("release");
        assert_eq!(
            keyboard_target(&board, &DragItem::task("1"), None, SortKey::Down, &searcher),
            Some(DragItem::task("3"))
        );
    }

    #[test]
    fn test_task_left_right_targets_adjacent_column() {
        let board = board();
        let active = DragItem::task("1");
        assert_eq!(
            keyboard_target(&board, &active, None, SortKey::Right, &all()),
            Some(DragItem::column("in-progress"))
        );
        assert_eq!(keyboard_target(&board, &active, None, SortKey::Left, &all()), None);
    }

    #[test]
    fn test_column_steps_from_current_target() {
        let board = board();
        let active = DragItem::column("todo");
        let first = keyboard_target(&board, &active, None, SortKey::Right, &all());
        assert_eq!(first, Some(DragItem::column("in-progress")));
        let second = keyboard_target(&board, &active, first.as_ref(), SortKey::Right, &all());
        assert_eq!(second, Some(DragItem::column("review")));

        let last = DragItem::column("done");
        assert_eq!(
            keyboard_target(&board, &active, Some(&last), SortKey::Right, &all()),
            None
        );
    }

    #[test]
    fn test_unknown_active_has_no_target() {
        let board = board();
        assert_eq!(
            keyboard_target(&board, &DragItem::task("404"), None, SortKey::Down, &all()),
            None
        );
    }
}
