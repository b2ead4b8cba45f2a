use crate::ordering::{array_move, relocate_to_column_end};
use crate::{Board, BoardRepository, BoardStore, ColumnId, Id, TaskId, TaskSearcher};

use super::keyboard::{keyboard_target, SortKey};
use super::{DragItem, EntityKind};

/// What a drag transition did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Unchanged,
    /// The task now sits at `index` in the global task sequence.
    TaskMoved {
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
    },
    ColumnMoved {
        column_id: ColumnId,
        index: usize,
    },
}

impl DragOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, DragOutcome::Unchanged)
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    item: DragItem,
    origin: Board,
    last_over: Option<DragItem>,
}

/// Interprets start/over/end gestures and applies them to a [`BoardStore`].
///
/// Task drags reorder the store live on every `over`; what the board shows
/// mid-drag is the committed state. Column drags only commit on `end`.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The item being dragged, for drawing the overlay and dimming its slot.
    pub fn active(&self) -> Option<&DragItem> {
        self.active.as_ref().map(|a| &a.item)
    }

    pub fn current_over(&self) -> Option<&DragItem> {
        self.active.as_ref().and_then(|a| a.last_over.as_ref())
    }

    /// Begins a gesture. Refuses when one is already running or the item is unknown.
    pub fn drag_start<R: BoardRepository>(&mut self, store: &BoardStore<R>, item: DragItem) -> bool {
        if let Some(active) = &self.active {
            tracing::warn!("Ignoring drag start for {} while {} is active", item, active.item);
            return false;
        }
        let exists = match item.kind {
            EntityKind::Column => store.column(&item.id).is_some(),
            EntityKind::Task => store.task(&item.id).is_some(),
        };
        if !exists {
            tracing::debug!("Ignoring drag start for unknown {}", item);
            return false;
        }

        tracing::debug!("Drag started: {}", item);
        self.active = Some(ActiveDrag {
            item,
            origin: store.board().clone(),
            last_over: None,
        });
        true
    }

    /// Pointer hover update. Repeating the previous target is ignored, so a
    /// task that just swapped past its target does not bounce back.
    pub fn drag_over<R: BoardRepository>(
        &mut self,
        store: &mut BoardStore<R>,
        over: Option<&DragItem>,
    ) -> DragOutcome {
        let Some(active) = self.active.as_mut() else {
            return DragOutcome::Unchanged;
        };
        if active.last_over.as_ref() == over {
            return DragOutcome::Unchanged;
        }
        active.last_over = over.cloned();

        let (Some(over), EntityKind::Task) = (over, active.item.kind) else {
            return DragOutcome::Unchanged;
        };
        let task_id = active.item.id.clone();
        move_task_over(store, &task_id, over)
    }

    /// Drops the active item onto `over` and returns to idle.
    ///
    /// A task drop commits nothing new; the live `over` handling already put
    /// it in place, so the outcome reports its final position relative to
    /// where it started. A column drop moves the column to the target's slot.
    pub fn drag_end<R: BoardRepository>(
        &mut self,
        store: &mut BoardStore<R>,
        over: Option<&DragItem>,
    ) -> DragOutcome {
        let Some(active) = self.active.take() else {
            return DragOutcome::Unchanged;
        };
        tracing::debug!(
            "Drag ended: {} over {}",
            active.item,
            over.map(ToString::to_string).unwrap_or_else(|| "nothing".to_string())
        );

        match active.item.kind {
            EntityKind::Task => task_drop_outcome(store.board(), &active.origin, &active.item.id),
            EntityKind::Column => match over {
                Some(over) => move_column_over(store, &active.item.id, over),
                None => DragOutcome::Unchanged,
            },
        }
    }

    /// Drops onto the last target seen by `drag_over` or `keyboard_step`.
    pub fn drop_at_current<R: BoardRepository>(&mut self, store: &mut BoardStore<R>) -> DragOutcome {
        let over = self.current_over().cloned();
        self.drag_end(store, over.as_ref())
    }

    /// Abandons the gesture and puts the board back the way it was at start.
    pub fn drag_cancel<R: BoardRepository>(&mut self, store: &mut BoardStore<R>) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        tracing::debug!("Drag cancelled: {}", active.item);
        if let Err(e) = store.restore(active.origin) {
            tracing::warn!("Could not restore board after cancelled drag: {}", e);
        }
        true
    }

    /// One arrow key in keyboard sorting mode.
    pub fn keyboard_step<R: BoardRepository, S: TaskSearcher + ?Sized>(
        &mut self,
        store: &mut BoardStore<R>,
        key: SortKey,
        searcher: &S,
    ) -> DragOutcome {
        let Some(active) = self.active.as_mut() else {
            return DragOutcome::Unchanged;
        };
        let Some(target) = keyboard_target(
            store.board(),
            &active.item,
            active.last_over.as_ref(),
            key,
            searcher,
        ) else {
            return DragOutcome::Unchanged;
        };

        let outcome = match active.item.kind {
            EntityKind::Task => move_task_over(store, &active.item.id, &target),
            EntityKind::Column => DragOutcome::Unchanged,
        };
        active.last_over = Some(target);
        outcome
    }
}

fn move_task_over<R: BoardRepository>(store: &mut BoardStore<R>, task_id: &Id, over: &DragItem) -> DragOutcome {
    if &over.id == task_id && over.is_task() {
        return DragOutcome::Unchanged;
    }
    let Some(from) = store.board().task_index(task_id) else {
        tracing::debug!("Dragged task {} no longer exists", task_id);
        return DragOutcome::Unchanged;
    };

    let mut tasks = store.tasks().to_vec();
    let placed = match over.kind {
        EntityKind::Task => {
            let Some(to) = store.board().task_index(&over.id) else {
                return DragOutcome::Unchanged;
            };
            let target_column = tasks[to].column_id.clone();
            if tasks[from].column_id != target_column {
                tasks[from].column_id = target_column;
            }
            array_move(&mut tasks, from, to).then_some(to)
        }
        EntityKind::Column => {
            if !store.board().has_column(&over.id) {
                return DragOutcome::Unchanged;
            }
            relocate_to_column_end(&mut tasks, from, &over.id)
        }
    };
    let Some(index) = placed else {
        return DragOutcome::Unchanged;
    };
    let column_id = tasks[index].column_id.clone();

    match store.reorder_tasks(tasks) {
        Ok(true) => {
            tracing::debug!("Task {} moved to {} in {}", task_id, index, column_id);
            DragOutcome::TaskMoved {
                task_id: task_id.clone(),
                column_id,
                index,
            }
        }
        Ok(false) => DragOutcome::Unchanged,
        Err(e) => {
            tracing::warn!("Rejected task move for {}: {}", task_id, e);
            DragOutcome::Unchanged
        }
    }
}

fn move_column_over<R: BoardRepository>(
    store: &mut BoardStore<R>,
    column_id: &ColumnId,
    over: &DragItem,
) -> DragOutcome {
    let target = match over.kind {
        EntityKind::Column => Some(over.id.clone()),
        EntityKind::Task => store.task(&over.id).map(|t| t.column_id.clone()),
    };
    let Some(target) = target else {
        return DragOutcome::Unchanged;
    };
    if &target == column_id {
        return DragOutcome::Unchanged;
    }
    let (Some(from), Some(to)) = (
        store.board().column_index(column_id),
        store.board().column_index(&target),
    ) else {
        return DragOutcome::Unchanged;
    };

    let mut columns = store.columns().to_vec();
    array_move(&mut columns, from, to);
    match store.reorder_columns(columns) {
        Ok(true) => DragOutcome::ColumnMoved {
            column_id: column_id.clone(),
            index: to,
        },
        Ok(false) => DragOutcome::Unchanged,
        Err(e) => {
            tracing::warn!("Rejected column move for {}: {}", column_id, e);
            DragOutcome::Unchanged
        }
    }
}

fn task_drop_outcome(board: &Board, origin: &Board, task_id: &TaskId) -> DragOutcome {
    let (Some(index), Some(task)) = (board.task_index(task_id), board.task(task_id)) else {
        return DragOutcome::Unchanged;
    };
    let unmoved = origin.task_index(task_id) == Some(index)
        && origin.task(task_id).map(|t| &t.column_id) == Some(&task.column_id);
    if unmoved {
        return DragOutcome::Unchanged;
    }
    DragOutcome::TaskMoved {
        task_id: task_id.clone(),
        column_id: task.column_id.clone(),
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentSearcher, SessionRepository, Task};

    fn store_with(tasks: &[(&str, &str)]) -> BoardStore<SessionRepository> {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let seq: Vec<Task> = tasks
            .iter()
            .map(|(id, column)| {
                let mut t = Task::new(Id::from(*column), format!("Task {}", id));
                t.id = Id::from(*id);
                t
            })
            .collect();
        let columns = store.columns().to_vec();
        store.restore(Board::new(columns, seq)).unwrap();
        store
    }

    fn order(store: &BoardStore<SessionRepository>) -> Vec<String> {
        store.tasks().iter().map(|t| t.id.to_string()).collect()
    }

    fn column_of(store: &BoardStore<SessionRepository>, id: &str) -> String {
        store.task(&Id::from(id)).unwrap().column_id.to_string()
    }

    #[test]
    fn test_drag_task_within_column() {
        let mut store = store_with(&[("A", "todo"), ("B", "todo"), ("C", "todo"), ("D", "todo")]);
        let mut drag = DragController::new();

        assert!(drag.drag_start(&store, DragItem::task("A")));
        let outcome = drag.drag_over(&mut store, Some(&DragItem::task("C")));
        assert_eq!(
            outcome,
            DragOutcome::TaskMoved {
                task_id: Id::from("A"),
                column_id: Id::from("todo"),
                index: 2
            }
        );
        assert_eq!(order(&store), vec!["B", "C", "A", "D"]);

        drag.drag_end(&mut store, Some(&DragItem::task("C")));
        assert!(!drag.is_dragging());
        assert_eq!(order(&store), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_drag_task_onto_task_in_other_column() {
        let mut store = store_with(&[("X", "todo"), ("Y", "done"), ("Z", "done")]);
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::task("X"));
        drag.drag_over(&mut store, Some(&DragItem::task("Z")));

        assert_eq!(column_of(&store, "X"), "done");
        let done_id = Id::from("done");
        let done: Vec<&str> = store
            .board()
            .tasks_in_column(&done_id)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(done, vec!["Y", "Z", "X"]);
    }

    #[test]
    fn test_drag_task_onto_empty_column() {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::task("2"));
        drag.drag_over(&mut store, Some(&DragItem::column("done")));
        let outcome = drag.drag_end(&mut store, Some(&DragItem::column("done")));

        assert_eq!(order(&store), vec!["1", "2"]);
        assert_eq!(column_of(&store, "2"), "done");
        assert_eq!(column_of(&store, "1"), "todo");
        assert_eq!(
            outcome,
            DragOutcome::TaskMoved {
                task_id: Id::from("2"),
                column_id: Id::from("done"),
                index: 1
            }
        );
    }

    #[test]
    fn test_drag_over_itself_is_noop() {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let before = store.board().clone();
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::task("1"));
        assert_eq!(
            drag.drag_over(&mut store, Some(&DragItem::task("1"))),
            DragOutcome::Unchanged
        );
        assert_eq!(
            drag.drag_end(&mut store, Some(&DragItem::task("1"))),
            DragOutcome::Unchanged
        );
        assert_eq!(store.board(), &before);
    }

    #[test]
    fn test_repeated_over_target_does_not_bounce() {
        let mut store = store_with(&[("A", "todo"), ("B", "todo")]);
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::task("A"));
        drag.drag_over(&mut store, Some(&DragItem::task("B")));
        assert_eq!(order(&store), vec!["B", "A"]);
        drag.drag_over(&mut store, Some(&DragItem::task("B")));
        assert_eq!(order(&store), vec!["B", "A"]);

        drag.drag_over(&mut store, Some(&DragItem::task("A")));
        drag.drag_over(&mut store, Some(&DragItem::task("B")));
        assert_eq!(order(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let mut drag = DragController::new();

        assert!(!drag.drag_start(&store, DragItem::task("404")));
        assert!(drag.drag_start(&store, DragItem::task("1")));
        let before = store.board().clone();
        assert_eq!(
            drag.drag_over(&mut store, Some(&DragItem::task("404"))),
            DragOutcome::Unchanged
        );
        assert_eq!(
            drag.drag_over(&mut store, Some(&DragItem::column("archive"))),
            DragOutcome::Unchanged
        );
        assert_eq!(store.board(), &before);

        store.delete_task(&Id::from("1"));
        assert_eq!(
            drag.drag_over(&mut store, Some(&DragItem::task("2"))),
            DragOutcome::Unchanged
        );
        assert_eq!(drag.drag_end(&mut store, None), DragOutcome::Unchanged);
    }

    #[test]
    fn test_column_drag_commits_on_end_only() {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::column("todo"));
        drag.drag_over(&mut store, Some(&DragItem::column("review")));
        assert_eq!(store.columns()[0].id, "todo");

        let outcome = drag.drop_at_current(&mut store);
        assert_eq!(
            outcome,
            DragOutcome::ColumnMoved {
                column_id: Id::from("todo"),
                index: 2
            }
        );
        let ids: Vec<&str> = store.columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["in-progress", "review", "todo", "done"]);
    }

    #[test]
    fn test_column_dropped_on_task_uses_its_column() {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::column("done"));
        let outcome = drag.drag_end(&mut store, Some(&DragItem::task("1")));
        assert_eq!(
            outcome,
            DragOutcome::ColumnMoved {
                column_id: Id::from("done"),
                index: 0
            }
        );
        assert_eq!(store.columns()[0].id, "done");
    }

    #[test]
    fn test_column_dropped_outside_is_noop() {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let before = store.board().clone();
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::column("todo"));
        assert_eq!(drag.drag_end(&mut store, None), DragOutcome::Unchanged);
        assert_eq!(store.board(), &before);
    }

    #[test]
    fn test_second_start_is_refused() {
        let store = BoardStore::initialize(SessionRepository::new());
        let mut drag = DragController::new();
        assert!(drag.drag_start(&store, DragItem::task("1")));
        assert!(!drag.drag_start(&store, DragItem::column("todo")));
        assert_eq!(drag.active(), Some(&DragItem::task("1")));
    }

    #[test]
    fn test_cancel_restores_origin() {
        let mut store = store_with(&[("A", "todo"), ("B", "todo"), ("C", "done")]);
        let before = store.board().clone();
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::task("A"));
        drag.drag_over(&mut store, Some(&DragItem::task("C")));
        assert_ne!(store.board(), &before);

        assert!(drag.drag_cancel(&mut store));
        assert_eq!(store.board(), &before);
        assert!(!drag.drag_cancel(&mut store));
    }

    #[test]
    fn test_keyboard_sorting_moves_task() {
        let mut store = store_with(&[("A", "todo"), ("B", "todo"), ("C", "todo")]);
        let all = ContentSearcher::new("");
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::task("A"));
        drag.keyboard_step(&mut store, SortKey::Down, &all);
        assert_eq!(order(&store), vec!["B", "A", "C"]);
        drag.keyboard_step(&mut store, SortKey::Up, &all);
        assert_eq!(order(&store), vec!["A", "B", "C"]);

        drag.keyboard_step(&mut store, SortKey::Right, &all);
        assert_eq!(column_of(&store, "A"), "in-progress");
        drag.drop_at_current(&mut store);
        assert!(!drag.is_dragging());
        assert_eq!(column_of(&store, "A"), "in-progress");
    }

    #[test]
    fn test_keyboard_sorting_moves_column() {
        let mut store = BoardStore::initialize(SessionRepository::new());
        let all = ContentSearcher::new("");
        let mut drag = DragController::new();

        drag.drag_start(&store, DragItem::column("todo"));
        drag.keyboard_step(&mut store, SortKey::Right, &all);
        drag.keyboard_step(&mut store, SortKey::Right, &all);
        assert_eq!(drag.current_over(), Some(&DragItem::column("review")));
        drag.drop_at_current(&mut store);
        assert_eq!(store.columns()[2].id, "todo");
    }

    #[test]
    fn test_mixed_operations_keep_board_consistent() {
        fn assert_consistent(store: &BoardStore<SessionRepository>) {
            assert!(store.board().check_integrity().is_ok(), "{:?}", store.board());
        }

        let mut store = store_with(&[("A", "todo"), ("B", "todo"), ("C", "in-progress"), ("D", "done")]);
        let all = ContentSearcher::new("");
        let mut drag = DragController::new();

        let created = store
            .create_task(crate::NewTask::new("E").in_column("review"))
            .unwrap();
        assert_consistent(&store);

        drag.drag_start(&store, DragItem::task("A"));
        for over in [
            DragItem::task("C"),
            DragItem::column("review"),
            DragItem::task(created.id.clone()),
            DragItem::column("done"),
        ] {
            drag.drag_over(&mut store, Some(&over));
            assert_consistent(&store);
        }
        drag.drag_end(&mut store, Some(&DragItem::column("done")));
        assert_consistent(&store);

        let backlog = store.create_column("Backlog");
        drag.drag_start(&store, DragItem::column(backlog.id.clone()));
        drag.drag_over(&mut store, Some(&DragItem::task("B")));
        drag.drag_end(&mut store, Some(&DragItem::task("B")));
        assert_consistent(&store);

        drag.drag_start(&store, DragItem::task("D"));
        drag.drag_over(&mut store, Some(&DragItem::column(backlog.id.clone())));
        assert_consistent(&store);
        assert!(drag.drag_cancel(&mut store));
        assert_consistent(&store);

        drag.drag_start(&store, DragItem::task("B"));
        for key in [SortKey::Right, SortKey::Down, SortKey::Right, SortKey::Up, SortKey::Left] {
            drag.keyboard_step(&mut store, key, &all);
            assert_consistent(&store);
        }
        drag.drop_at_current(&mut store);
        assert_consistent(&store);

        assert!(store.delete_task(&Id::from("C")));
        drag.drag_start(&store, DragItem::task("A"));
        drag.drag_over(&mut store, Some(&DragItem::task("C")));
        drag.drag_end(&mut store, None);
        assert_consistent(&store);

        assert_eq!(store.tasks().len(), 4);
        assert_eq!(store.columns().len(), 5);
    }
}
