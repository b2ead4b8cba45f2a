use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use kanban_domain::{BoardRepository, BoardStore, DragItem, Id, SessionRepository};
use kanban_persistence::open_file_repository;
use kanban_tui::{ui, App, AppMode};
use ratatui::{backend::TestBackend, Terminal};
use tempfile::tempdir;

fn draw<R: BoardRepository>(terminal: &mut Terminal<TestBackend>, app: &mut App<R>) {
    terminal.draw(|frame| ui::render(app, frame)).unwrap();
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn mouse<R: BoardRepository>(app: &mut App<R>, kind: MouseEventKind, column: u16, row: u16) {
    app.handle_mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    });
}

fn setup() -> (Terminal<TestBackend>, App<SessionRepository>) {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    let mut app = App::new(BoardStore::initialize(SessionRepository::new()));
    draw(&mut terminal, &mut app);
    (terminal, app)
}

fn order<R: BoardRepository>(app: &App<R>) -> Vec<String> {
    app.store.tasks().iter().map(|t| t.id.to_string()).collect()
}

#[test]
fn test_render_shows_columns_and_cards() {
    let (terminal, app) = setup();
    let text = screen(&terminal);
    assert!(text.contains("To Do (2)"));
    assert!(text.contains("In Progress (0)"));
    assert!(text.contains("Design new landing page"));
    assert!(text.contains("Drop tasks here"));

    let column = app.hit_map.rect_of(&DragItem::column("todo")).unwrap();
    let card = app.hit_map.rect_of(&DragItem::task("1")).unwrap();
    assert!(column.contains(kanban_domain::Point::new(card.left, card.top)));
    assert_eq!(app.hit_map.droppables().len(), 6);
}

#[test]
fn test_mouse_drag_reorders_within_column() {
    let (_terminal, mut app) = setup();
    let card = app.hit_map.rect_of(&DragItem::task("1")).unwrap();
    let x = card.left as u16 + 4;
    let y = card.top as u16 + 2;

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x, y + 2);
    assert!(!app.drag.is_dragging());

    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x, y + 5);
    assert!(app.drag.is_dragging());
    assert!(app.overlay.is_some());

    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x, y + 6);
    assert_eq!(order(&app), vec!["2", "1"]);

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), x, y + 6);
    assert!(!app.drag.is_dragging());
    assert!(app.overlay.is_none());
    assert_eq!(order(&app), vec!["2", "1"]);
    assert_eq!(app.focused_task_id(), Some(Id::from("1")));
}

#[test]
fn test_mouse_drag_into_empty_column() {
    let (mut terminal, mut app) = setup();
    let card = app.hit_map.rect_of(&DragItem::task("1")).unwrap();
    let x = card.left as u16 + 4;
    let y = card.top as u16 + 2;

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x + 35, y);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x + 36, y);
    assert_eq!(
        app.drag.current_over(),
        Some(&DragItem::column("in-progress"))
    );
    draw(&mut terminal, &mut app);

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), x + 36, y);
    let task = app.store.task(&Id::from("1")).unwrap();
    assert_eq!(task.column_id, "in-progress");
    assert_eq!(app.focused_column_id(), Some(Id::from("in-progress")));

    draw(&mut terminal, &mut app);
    let text = screen(&terminal);
    assert!(text.contains("To Do (1)"));
    assert!(text.contains("In Progress (1)"));
}

#[test]
fn test_click_opens_editor() {
    let (_terminal, mut app) = setup();
    let card = app.hit_map.rect_of(&DragItem::task("2")).unwrap();
    let x = card.left as u16 + 3;
    let y = card.top as u16 + 1;

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x + 1, y + 1);
    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), x + 1, y + 1);

    assert_eq!(app.mode, AppMode::TaskModal);
    let form = app.form.as_ref().unwrap();
    assert!(form.is_edit());
    assert_eq!(form.title.as_str(), "Competitor analysis");
}

#[test]
fn test_escape_cancels_pointer_drag() {
    let (_terminal, mut app) = setup();
    let card = app.hit_map.rect_of(&DragItem::task("1")).unwrap();
    let x = card.left as u16 + 4;
    let y = card.top as u16 + 2;

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x, y + 5);
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x, y + 6);
    assert_eq!(order(&app), vec!["2", "1"]);

    app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert!(!app.drag.is_dragging());
    assert!(!app.sensor.is_pressed());
    assert_eq!(order(&app), vec!["1", "2"]);

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), x, y + 6);
    assert_eq!(order(&app), vec!["1", "2"]);
}

#[test]
fn test_pointer_drag_persists_to_disk() {
    let dir = tempdir().unwrap();
    {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut app = App::new(BoardStore::initialize(open_file_repository(dir.path()).unwrap()));
        draw(&mut terminal, &mut app);

        let card = app.hit_map.rect_of(&DragItem::task("2")).unwrap();
        let x = card.left as u16 + 4;
        let y = card.top as u16 + 2;
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), x, y);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x + 90, y);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), x + 91, y);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), x + 91, y);
        assert_eq!(app.store.task(&Id::from("2")).unwrap().column_id, "done");
    }

    let reopened = BoardStore::initialize(open_file_repository(dir.path()).unwrap());
    assert_eq!(reopened.task(&Id::from("2")).unwrap().column_id, "done");
}
