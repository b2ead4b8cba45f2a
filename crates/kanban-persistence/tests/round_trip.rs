use kanban_core::KeyValueStore;
use kanban_domain::{Board, BoardStore, DragController, DragItem, Id, NewTask, Priority};
use kanban_persistence::{open_file_repository, FileKeyValueStore, COLUMNS_KEY, TASKS_KEY};
use tempfile::tempdir;

#[test]
fn test_board_survives_restart() {
    let dir = tempdir().unwrap();

    let expected = {
        let mut store = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
        store
            .create_task(
                NewTask::new("Write tests")
                    .in_column("review")
                    .with_priority(Priority::High)
                    .with_tags(["qa"]),
            )
            .unwrap();
        store.create_column("Backlog");

        let mut drag = DragController::new();
        drag.drag_start(&store, DragItem::task("2"));
        drag.drag_over(&mut store, Some(&DragItem::column("done")));
        drag.drag_end(&mut store, Some(&DragItem::column("done")));

        store.board().clone()
    };

    let reopened = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
    assert_eq!(reopened.board(), &expected);
    assert_eq!(reopened.task(&Id::from("2")).unwrap().column_id, "done");
}

#[test]
fn test_empty_directory_seeds_defaults() {
    let dir = tempdir().unwrap();
    let store = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
    assert_eq!(store.board(), &Board::seeded());
}

#[test]
fn test_corrupt_tasks_fall_back_independently() {
    let dir = tempdir().unwrap();
    {
        let mut store = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
        let mut columns = store.columns().to_vec();
        columns.reverse();
        store.reorder_columns(columns).unwrap();
    }
    let mut raw = FileKeyValueStore::open(dir.path()).unwrap();
    raw.set(TASKS_KEY, "{not json").unwrap();

    let store = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
    assert_eq!(store.columns()[0].id, "done");
    assert_eq!(store.tasks(), Board::seeded().tasks.as_slice());
}

#[test]
fn test_dangling_references_reseed_everything() {
    let dir = tempdir().unwrap();
    let mut raw = FileKeyValueStore::open(dir.path()).unwrap();
    raw.set(COLUMNS_KEY, r#"[{"id":"only","title":"Only"}]"#).unwrap();
    raw.set(
        TASKS_KEY,
        r#"{"version":1,"saved_at":"2024-05-01T12:00:00Z","items":[{"id":"1","columnId":"gone","content":"Orphan"}]}"#,
    )
    .unwrap();

    let store = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
    assert_eq!(store.board(), &Board::seeded());
}

#[test]
fn test_task_created_after_reseed_survives_restart() {
    let dir = tempdir().unwrap();
    let mut raw = FileKeyValueStore::open(dir.path()).unwrap();
    raw.set(COLUMNS_KEY, r#"[{"id":"only","title":"Only"}]"#).unwrap();
    raw.set(TASKS_KEY, r#"[{"id":"1","columnId":"gone","content":"Orphan"}]"#)
        .unwrap();

    let created = {
        let mut store = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
        store
            .create_task(NewTask::new("After reseed").in_column("todo"))
            .unwrap()
    };

    let stored: serde_json::Value =
        serde_json::from_str(&raw.get(COLUMNS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored["items"][0]["id"], "todo");

    let reopened = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
    assert_eq!(reopened.columns().len(), 4);
    let task = reopened.task(&created.id).unwrap();
    assert_eq!(task.content, "After reseed");
    assert_eq!(task.column_id, "todo");
    assert_eq!(reopened.tasks().len(), 3);
}

#[test]
fn test_legacy_layout_is_rewritten_on_next_save() {
    let dir = tempdir().unwrap();
    let mut raw = FileKeyValueStore::open(dir.path()).unwrap();
    raw.set(
        TASKS_KEY,
        r#"[{"id":1,"columnId":"todo","content":"Legacy","priority":"low"}]"#,
    )
    .unwrap();

    let mut store = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].priority, Priority::Low);

    store.create_task(NewTask::new("Fresh")).unwrap();
    let stored = raw.get(TASKS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["items"][0]["id"], "1");
}
