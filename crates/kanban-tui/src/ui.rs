use crate::app::{App, AppMode};
use crate::components::*;
use crate::hit_map::to_cell_rect;
use crate::theme::*;
use kanban_domain::{
    BoardRepository, BoardView, Column, DragItem, EntityKind, FormField, Priority, TaskForm,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render<R: BoardRepository>(app: &mut App<R>, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_board(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);
    render_overlay(app, frame);

    match app.mode {
        AppMode::TaskModal => {
            if let Some(form) = &app.form {
                render_task_modal(form, frame);
            }
        }
        AppMode::CreateColumn => render_input_popup(
            frame,
            "Create New Column",
            "Column Name:",
            app.column_input.as_str(),
            app.column_input.cursor_pos(),
        ),
        _ => {}
    }
}

fn render_header<R: BoardRepository>(app: &App<R>, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(32)])
        .split(area);

    let total = app.store.tasks().len();
    let title = Paragraph::new(Line::from(vec![
        Span::styled("Kanban Board", bold_highlight()),
        Span::styled(format!("  {} tasks", total), label_text()),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(unfocused_border()));
    frame.render_widget(title, chunks[0]);

    let searching = app.mode == AppMode::Search;
    let search_text = if app.search.is_empty() && !searching {
        Span::styled("/ to search", label_text())
    } else {
        Span::styled(app.search.as_str().to_string(), normal_text())
    };
    let border = if searching {
        focused_border()
    } else {
        unfocused_border()
    };
    let search = Paragraph::new(Line::from(search_text)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(search, chunks[1]);

    if searching {
        frame.set_cursor_position(input_cursor(chunks[1], app.search.cursor_pos()));
    }
}

/// Column the current drop target resolves to, if any.
fn drop_column<R: BoardRepository>(app: &App<R>) -> Option<kanban_domain::ColumnId> {
    let over = app.drag.current_over()?;
    match over.kind {
        EntityKind::Column => Some(over.id.clone()),
        EntityKind::Task => app.store.task(&over.id).map(|t| t.column_id.clone()),
    }
}

fn render_board<R: BoardRepository>(app: &mut App<R>, frame: &mut Frame, area: Rect) {
    app.hit_map.clear();

    let columns: Vec<Column> = app.store.columns().to_vec();
    if columns.is_empty() {
        let empty = Paragraph::new("No columns. Press N to add one.")
            .style(label_text())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let count = columns.len() as u32;
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let drop_target = drop_column(app);
    let searcher = app.searcher();
    let active = app.drag.active().cloned();

    for (index, (column, column_area)) in columns.iter().zip(areas.iter()).enumerate() {
        let column_area = *column_area;
        let is_focused = index == app.focused_column;
        let is_dragged = active.as_ref() == Some(&DragItem::column(column.id.clone()));
        let is_drop_target = drop_target.as_ref() == Some(&column.id) && active.is_some();

        let view = BoardView::new(app.store.board(), &searcher);
        let tasks: Vec<_> = view.column_tasks(&column.id).cloned().collect();

        let border = if is_dragged {
            ghost_text()
        } else if is_drop_target {
            drop_target_border()
        } else if is_focused {
            focused_border()
        } else {
            unfocused_border()
        };
        let block = Block::default()
            .title(format!("{} ({})", column.title, tasks.len()))
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(column_area);
        frame.render_widget(block, column_area);
        app.hit_map
            .push(DragItem::column(column.id.clone()), column_area);

        if is_dragged {
            continue;
        }

        if tasks.is_empty() {
            let hint = Paragraph::new("Drop tasks here").style(ghost_text());
            frame.render_widget(hint, inner);
            continue;
        }

        let capacity = usize::from((inner.height / CARD_HEIGHT).max(1));
        let selected = if is_focused { app.focused_task } else { None };
        let offset = match selected {
            Some(i) if i >= capacity => i + 1 - capacity,
            _ => 0,
        };

        for (slot, (task_index, task)) in tasks
            .iter()
            .enumerate()
            .skip(offset)
            .take(capacity)
            .enumerate()
        {
            let y = inner.y + slot as u16 * CARD_HEIGHT;
            if y >= inner.bottom() {
                break;
            }
            let height = CARD_HEIGHT.min(inner.bottom() - y);
            let card_area = Rect::new(inner.x, y, inner.width, height);

            let item = DragItem::task(task.id.clone());
            let is_ghost = active.as_ref() == Some(&item);
            let is_selected = selected == Some(task_index);
            let card_border = if is_ghost {
                ghost_text()
            } else if is_selected {
                focused_border()
            } else {
                unfocused_border()
            };
            let card_block = Block::default()
                .borders(Borders::ALL)
                .border_style(card_border);
            let card_inner = card_block.inner(card_area);
            let lines = render_card_lines(
                &CardConfig {
                    task,
                    is_selected,
                    is_focused,
                    is_ghost,
                },
                card_inner.width,
            );
            frame.render_widget(Paragraph::new(lines).block(card_block), card_area);
            app.hit_map.push(item, card_area);
        }
    }
}

/// Floating copy of the dragged item that follows the pointer.
fn render_overlay<R: BoardRepository>(app: &App<R>, frame: &mut Frame) {
    let (Some(rect), Some(active)) = (app.overlay, app.drag.active()) else {
        return;
    };
    let area = to_cell_rect(rect, frame.area());
    if area.width < 3 || area.height < 3 {
        return;
    }

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(drop_target_border())
        .style(popup_bg());
    let inner = block.inner(area);

    match active.kind {
        EntityKind::Task => {
            let Some(task) = app.store.task(&active.id) else {
                return;
            };
            let lines = render_card_lines(
                &CardConfig {
                    task,
                    is_selected: true,
                    is_focused: true,
                    is_ghost: false,
                },
                inner.width,
            );
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
        EntityKind::Column => {
            let title = app
                .store
                .column(&active.id)
                .map(|c| c.title.clone())
                .unwrap_or_default();
            frame.render_widget(block.title(title), area);
        }
    }
}

fn render_footer<R: BoardRepository>(app: &App<R>, frame: &mut Frame, area: Rect) {
    let line = if let Some(status) = &app.status {
        Line::from(Span::styled(status.clone(), highlight_text()))
    } else {
        let help = match app.mode {
            AppMode::Normal if app.drag.is_dragging() => "Drag to move | ESC: cancel drag",
            AppMode::Normal => {
                "n: new task | N: new column | ENTER: edit | SPACE: pick up | /: search | q: back"
            }
            AppMode::Search => "Type to filter | ENTER: keep filter | ESC: clear",
            AppMode::Sorting => "Arrows: move | SPACE/ENTER: drop | ESC: cancel",
            AppMode::TaskModal => {
                "TAB: next field | ENTER: save | LEFT/DEL: remove tag | CTRL+D: delete | ESC: close"
            }
            AppMode::CreateColumn => "ENTER: create | ESC: cancel",
        };
        Line::from(Span::styled(help, label_text()))
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn field_label(form: &TaskForm, field: FormField) -> Span<'static> {
    let style = if form.focus() == field {
        bold_highlight()
    } else {
        label_text()
    };
    Span::styled(field.label(), style)
}

fn field_border(form: &TaskForm, field: FormField) -> Block<'static> {
    let style = if form.focus() == field {
        focused_border()
    } else {
        unfocused_border()
    };
    Block::default().borders(Borders::ALL).border_style(style)
}

fn priority_line(selected: Priority) -> Line<'static> {
    let mut spans = vec![Span::styled("< ", label_text())];
    for (i, priority) in Priority::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *priority == selected {
            priority_style(*priority).patch(selected_item(true))
        } else {
            ghost_text()
        };
        spans.push(Span::styled(priority.as_str().to_string(), style));
    }
    spans.push(Span::styled(" >", label_text()));
    Line::from(spans)
}

fn render_task_modal(form: &TaskForm, frame: &mut Frame) {
    let title = if form.is_edit() { "Edit Task" } else { "New Task" };
    let inner = render_popup_with_block(frame, title, 60, 70);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(field_label(form, FormField::Title))),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(form.title.as_str().to_string())
            .style(normal_text())
            .block(field_border(form, FormField::Title)),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(Line::from(field_label(form, FormField::Description))),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(form.description.as_str().to_string())
            .style(normal_text())
            .block(field_border(form, FormField::Description)),
        chunks[3],
    );

    frame.render_widget(
        Paragraph::new(Line::from(field_label(form, FormField::Priority))),
        chunks[4],
    );
    frame.render_widget(Paragraph::new(priority_line(form.priority)), chunks[5]);

    frame.render_widget(
        Paragraph::new(Line::from(field_label(form, FormField::Tags))),
        chunks[6],
    );
    let chips: Vec<Span> = if form.tags().is_empty() {
        vec![Span::styled("no tags", ghost_text())]
    } else {
        form.tags()
            .iter()
            .enumerate()
            .flat_map(|(i, t)| {
                let style = if form.selected_tag() == Some(i) {
                    tag_style().patch(selected_item(true))
                } else {
                    tag_style()
                };
                [Span::styled(format!("[{}]", t), style), Span::raw(" ")]
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(Line::from(chips)), chunks[7]);
    frame.render_widget(
        Paragraph::new(form.tag_input.as_str().to_string())
            .style(normal_text())
            .block(field_border(form, FormField::Tags)),
        chunks[8],
    );

    if let Some(error) = form.error() {
        frame.render_widget(
            Paragraph::new(error.to_string()).style(error_text()),
            chunks[9],
        );
    }

    let cursor = match form.focus() {
        FormField::Title => Some((chunks[1], form.title.cursor_pos())),
        FormField::Description => Some((chunks[3], form.description.cursor_pos())),
        FormField::Tags => Some((chunks[8], form.tag_input.cursor_pos())),
        FormField::Priority => None,
    };
    if let Some((area, pos)) = cursor {
        frame.set_cursor_position(input_cursor(area, pos));
    }
}
