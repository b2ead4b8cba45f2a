use crate::theme::{focused_border, popup_bg};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn render_input_popup(
    frame: &mut Frame,
    title: &str,
    label: &str,
    input_text: &str,
    cursor_pos: usize,
) {
    let inner = render_popup_with_block(frame, title, 50, 25);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let label_widget = Paragraph::new(label).style(crate::theme::highlight_text());
    frame.render_widget(label_widget, chunks[0]);

    let input = Paragraph::new(input_text)
        .style(crate::theme::normal_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, chunks[1]);

    frame.set_cursor_position(input_cursor(chunks[1], cursor_pos));
}

/// Cursor cell inside a bordered single-line input, kept off the right border.
pub fn input_cursor(area: Rect, cursor_pos: usize) -> (u16, u16) {
    let offset = u16::try_from(cursor_pos).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2));
    (x, area.y.saturating_add(1))
}

pub fn render_popup_with_block(
    frame: &mut Frame,
    title: &str,
    width_percent: u16,
    height_percent: u16,
) -> Rect {
    let area = centered_rect(width_percent, height_percent, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    inner
}
