use super::colors::*;
use kanban_domain::Priority;
use ratatui::style::{Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn drop_target_border() -> Style {
    Style::default()
        .fg(DROP_TARGET_BORDER)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(SELECTED_BG)
    } else {
        Style::default()
    }
}

/// Source slot of the item being dragged.
pub fn ghost_text() -> Style {
    Style::default().fg(GHOST_TEXT).add_modifier(Modifier::DIM)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn tag_style() -> Style {
    Style::default().fg(TAG_TEXT)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

pub fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::High => PRIORITY_HIGH,
        Priority::Medium => PRIORITY_MEDIUM,
        Priority::Low => PRIORITY_LOW,
    };
    Style::default().fg(color)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
