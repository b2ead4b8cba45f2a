use crate::{
    dialog::{edit_text, handle_dialog_input, DialogAction},
    events::{Event, EventHandler},
    hit_map::{cell_point, HitMap},
    ui,
};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kanban_core::{InputState, KanbanError, KanbanResult};
use kanban_domain::{
    closest_corners, BoardRepository, BoardStore, ColumnId, ContentSearcher,
    DragController, DragItem, EntityKind, FormField, FormOutcome, Navigator, Point,
    PointerEvent, PointerSensor, Rect as DropRect, SortKey, Task, TaskForm, TaskId, TaskSearcher,
    HOME_VIEW,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Search,
    /// Keyboard drag in progress.
    Sorting,
    TaskModal,
    CreateColumn,
}

pub struct App<R: BoardRepository> {
    pub should_quit: bool,
    pub mode: AppMode,
    pub store: BoardStore<R>,
    pub drag: DragController,
    pub sensor: PointerSensor,
    pub search: InputState,
    pub column_input: InputState,
    pub form: Option<TaskForm>,
    pub hit_map: HitMap,
    pub focused_column: usize,
    /// Index into the focused column's visible tasks.
    pub focused_task: Option<usize>,
    /// Where the floating drag overlay is drawn.
    pub overlay: Option<DropRect>,
    pub status: Option<String>,
    press_rect: Option<DropRect>,
    navigator: Box<dyn Navigator>,
}

impl<R: BoardRepository> App<R> {
    pub fn new(store: BoardStore<R>) -> Self {
        let mut app = Self {
            should_quit: false,
            mode: AppMode::Normal,
            store,
            drag: DragController::new(),
            sensor: PointerSensor::default(),
            search: InputState::new(),
            column_input: InputState::new(),
            form: None,
            hit_map: HitMap::new(),
            focused_column: 0,
            focused_task: None,
            overlay: None,
            status: None,
            press_rect: None,
            navigator: Box::new(|view: &str| tracing::info!("Navigating to {}", view)),
        };
        app.clamp_focus();
        app
    }

    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    pub fn with_activation_distance(mut self, distance: f64) -> Self {
        self.sensor = PointerSensor::new(distance);
        self
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn searcher(&self) -> ContentSearcher {
        ContentSearcher::new(self.search.as_str())
    }

    /// Tasks of a column that pass the current search, in display order.
    pub fn visible_tasks<'a>(&'a self, column_id: &'a ColumnId) -> Vec<&'a Task> {
        let searcher = self.searcher();
        self.store
            .board()
            .tasks_in_column(column_id)
            .filter(|t| searcher.matches(t))
            .collect()
    }

    pub fn focused_column_id(&self) -> Option<ColumnId> {
        self.store
            .columns()
            .get(self.focused_column)
            .map(|c| c.id.clone())
    }

    pub fn focused_task_id(&self) -> Option<TaskId> {
        let column_id = self.focused_column_id()?;
        let index = self.focused_task?;
        self.visible_tasks(&column_id)
            .get(index)
            .map(|t| t.id.clone())
    }

    fn clamp_focus(&mut self) {
        let columns = self.store.columns().len();
        if columns == 0 {
            self.focused_column = 0;
            self.focused_task = None;
            return;
        }
        self.focused_column = self.focused_column.min(columns - 1);
        let count = self
            .focused_column_id()
            .map(|id| self.visible_tasks(&id).len())
            .unwrap_or(0);
        self.focused_task = match (count, self.focused_task) {
            (0, _) => None,
            (n, Some(i)) => Some(i.min(n - 1)),
            (_, None) => Some(0),
        };
    }

    /// Moves focus to wherever `item` currently sits.
    fn focus_item(&mut self, item: &DragItem) {
        let column_id = match item.kind {
            EntityKind::Column => Some(item.id.clone()),
            EntityKind::Task => self.store.task(&item.id).map(|t| t.column_id.clone()),
        };
        let Some(column_id) = column_id else {
            self.clamp_focus();
            return;
        };
        if let Some(index) = self.store.board().column_index(&column_id) {
            self.focused_column = index;
        }
        if item.is_task() {
            let position = self
                .visible_tasks(&column_id)
                .iter()
                .position(|t| t.id == item.id);
            self.focused_task = position;
        }
        self.clamp_focus();
    }

    fn move_column_focus(&mut self, forward: bool) {
        let columns = self.store.columns().len();
        if columns == 0 {
            return;
        }
        self.focused_column = if forward {
            (self.focused_column + 1).min(columns - 1)
        } else {
            self.focused_column.saturating_sub(1)
        };
        self.focused_task = None;
        self.clamp_focus();
    }

    fn move_task_focus(&mut self, forward: bool) {
        let Some(current) = self.focused_task else {
            return;
        };
        self.focused_task = Some(if forward {
            current + 1
        } else {
            current.saturating_sub(1)
        });
        self.clamp_focus();
    }

    fn leave(&mut self) {
        self.navigator.navigate(HOME_VIEW);
        self.quit();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        self.status = None;

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::Sorting => self.handle_sorting_key(key),
            AppMode::TaskModal => self.handle_modal_key(key),
            AppMode::CreateColumn => self.handle_create_column_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.drag.is_dragging() {
            if key.code == KeyCode::Esc {
                self.cancel_pointer_drag();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('b') => self.leave(),
            KeyCode::Char('n') => self.open_create_form(),
            KeyCode::Char('N') => {
                self.column_input.clear();
                self.mode = AppMode::CreateColumn;
            }
            KeyCode::Enter => self.open_edit_form(),
            KeyCode::Char('/') => self.mode = AppMode::Search,
            KeyCode::Char(' ') => self.start_keyboard_sort(),
            KeyCode::Left | KeyCode::Char('h') => self.move_column_focus(false),
            KeyCode::Right | KeyCode::Char('l') => self.move_column_focus(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_task_focus(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_task_focus(true),
            KeyCode::Esc => {
                if !self.search.is_empty() {
                    self.search.clear();
                    self.clamp_focus();
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match handle_dialog_input(&mut self.search, key.code, true) {
            DialogAction::Confirm => self.mode = AppMode::Normal,
            DialogAction::Cancel => {
                self.search.clear();
                self.mode = AppMode::Normal;
            }
            DialogAction::None => {}
        }
        self.clamp_focus();
    }

    fn handle_create_column_key(&mut self, key: KeyEvent) {
        match handle_dialog_input(&mut self.column_input, key.code, false) {
            DialogAction::Confirm => {
                let title = self.column_input.trimmed().to_string();
                let column = self.store.create_column(title);
                self.column_input.clear();
                self.mode = AppMode::Normal;
                self.focus_item(&DragItem::column(column.id));
            }
            DialogAction::Cancel => {
                self.column_input.clear();
                self.mode = AppMode::Normal;
            }
            DialogAction::None => {}
        }
    }

    fn start_keyboard_sort(&mut self) {
        let item = match self.focused_task_id() {
            Some(task_id) => DragItem::task(task_id),
            None => match self.focused_column_id() {
                Some(column_id) => DragItem::column(column_id),
                None => return,
            },
        };
        if self.drag.drag_start(&self.store, item) {
            self.mode = AppMode::Sorting;
        }
    }

    fn handle_sorting_key(&mut self, key: KeyEvent) {
        let sort_key = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(SortKey::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(SortKey::Down),
            KeyCode::Left | KeyCode::Char('h') => Some(SortKey::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(SortKey::Right),
            _ => None,
        };
        let active = self.drag.active().cloned();

        if let Some(sort_key) = sort_key {
            let searcher = self.searcher();
            self.drag.keyboard_step(&mut self.store, sort_key, &searcher);
            let follow = match &active {
                Some(item) if item.is_column() => self.drag.current_over().cloned(),
                _ => active,
            };
            if let Some(item) = follow {
                self.focus_item(&item);
            }
            return;
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.drag.drop_at_current(&mut self.store);
                self.mode = AppMode::Normal;
                if let Some(item) = active {
                    self.focus_item(&item);
                }
            }
            KeyCode::Esc => {
                self.drag.drag_cancel(&mut self.store);
                self.mode = AppMode::Normal;
                if let Some(item) = active {
                    self.focus_item(&item);
                }
            }
            _ => {}
        }
    }

    fn open_create_form(&mut self) {
        if let Some(column_id) = self.focused_column_id() {
            self.form = Some(TaskForm::for_create(column_id));
            self.mode = AppMode::TaskModal;
        }
    }

    fn open_edit_form(&mut self) {
        let Some(task_id) = self.focused_task_id() else {
            return;
        };
        if let Some(task) = self.store.task(&task_id) {
            self.form = Some(TaskForm::for_edit(task));
            self.mode = AppMode::TaskModal;
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(mut form) = self.form.take() else {
            self.mode = AppMode::Normal;
            return;
        };

        let keep_open = if key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('d')
        {
            if !form.is_edit() {
                true
            } else {
                if form.delete(&mut self.store) {
                    self.status = Some("Task deleted".to_string());
                }
                false
            }
        } else {
            match key.code {
                KeyCode::Esc => false,
                KeyCode::Tab => {
                    form.next_field();
                    true
                }
                KeyCode::BackTab => {
                    form.prev_field();
                    true
                }
                KeyCode::Enter if form.focus() == FormField::Tags && !form.tag_input.is_blank() => {
                    form.commit_tag();
                    true
                }
                KeyCode::Enter => self.submit_form(&mut form),
                KeyCode::Backspace | KeyCode::Delete
                    if form.focus() == FormField::Tags && form.selected_tag().is_some() =>
                {
                    form.remove_selected_tag();
                    true
                }
                KeyCode::Backspace
                    if form.focus() == FormField::Tags && form.tag_input.is_empty() =>
                {
                    form.pop_tag();
                    true
                }
                KeyCode::Left if form.focus() == FormField::Tags && form.tag_input.is_empty() => {
                    form.select_prev_tag();
                    true
                }
                KeyCode::Right if form.focus() == FormField::Tags && form.selected_tag().is_some() => {
                    form.select_next_tag();
                    true
                }
                KeyCode::Left if form.focus() == FormField::Priority => {
                    form.priority = form.priority.prev();
                    true
                }
                KeyCode::Right if form.focus() == FormField::Priority => {
                    form.priority = form.priority.next();
                    true
                }
                code => {
                    form.clear_tag_selection();
                    if let Some(input) = form.focused_input_mut() {
                        edit_text(input, code);
                    }
                    true
                }
            }
        };

        if keep_open {
            self.form = Some(form);
        } else {
            self.mode = AppMode::Normal;
            self.clamp_focus();
        }
    }

    /// Returns whether the modal stays open.
    fn submit_form(&mut self, form: &mut TaskForm) -> bool {
        match form.submit(&mut self.store) {
            Ok(FormOutcome::Created(task)) => {
                self.status = Some(format!("Created \"{}\"", task.content));
                self.focus_item(&DragItem::task(task.id));
                false
            }
            Ok(FormOutcome::Updated(task)) => {
                self.focus_item(&DragItem::task(task.id));
                false
            }
            Ok(FormOutcome::Missing) => {
                self.status = Some("Task no longer exists".to_string());
                false
            }
            Err(KanbanError::Validation(_)) => true,
            Err(e) => {
                tracing::error!("Failed to save task: {}", e);
                self.status = Some(e.to_string());
                true
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.mode != AppMode::Normal {
            return;
        }
        let point = cell_point(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(item) = self.hit_map.item_at(point).cloned() {
                    self.press_rect = self.hit_map.rect_of(&item);
                    self.sensor.press(item, point);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.sensor.move_to(point) {
                Some(PointerEvent::Activate { item }) => {
                    if self.drag.drag_start(&self.store, item) {
                        self.overlay = self.press_rect;
                    } else {
                        self.sensor.cancel();
                    }
                }
                Some(PointerEvent::Move { delta, .. }) => {
                    let over = self.collide(delta);
                    self.drag.drag_over(&mut self.store, over.as_ref());
                }
                _ => {}
            },
            MouseEventKind::Up(MouseButton::Left) => match self.sensor.release(point) {
                Some(PointerEvent::Drop { item, delta }) => {
                    let over = self.collide(delta);
                    self.drag.drag_end(&mut self.store, over.as_ref());
                    self.overlay = None;
                    self.press_rect = None;
                    self.focus_item(&item);
                }
                Some(PointerEvent::Click { item }) => {
                    self.press_rect = None;
                    self.focus_item(&item);
                    if item.is_task() {
                        self.open_edit_form();
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn collide(&mut self, delta: Point) -> Option<DragItem> {
        let rect = self.press_rect?.translate(delta);
        self.overlay = Some(rect);
        closest_corners(&rect, self.hit_map.droppables()).cloned()
    }

    fn cancel_pointer_drag(&mut self) {
        self.sensor.cancel();
        let active = self.drag.active().cloned();
        self.drag.drag_cancel(&mut self.store);
        self.overlay = None;
        self.press_rect = None;
        if let Some(item) = active {
            self.focus_item(&item);
        }
    }

    pub async fn run(&mut self) -> KanbanResult<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();

        let result = self.event_loop(&mut terminal, &mut events).await;

        events.stop();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut EventHandler,
    ) -> KanbanResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key),
                Some(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                Some(Event::Resize) | Some(Event::Tick) => {}
                None => break,
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
