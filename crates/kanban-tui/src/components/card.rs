use crate::theme::*;
use kanban_domain::Task;
use ratatui::text::{Line, Span};

/// Rows a card occupies, borders included.
pub const CARD_HEIGHT: u16 = 5;

pub struct CardConfig<'a> {
    pub task: &'a Task,
    pub is_selected: bool,
    pub is_focused: bool,
    /// The card is the one being dragged; draw it as an empty slot.
    pub is_ghost: bool,
}

/// Shortens `text` to at most `max` chars, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

fn metadata_text(task: &Task) -> String {
    let mut parts = Vec::new();
    if task.comments > 0 {
        parts.push(format!("✉ {}", task.comments));
    }
    if task.attachments > 0 {
        parts.push(format!("⎘ {}", task.attachments));
    }
    if let Some(due) = &task.due_date {
        parts.push(format!("⏱ {}", due));
    }
    if !task.assignees.is_empty() {
        parts.push(format!("@{}", task.assignees.len()));
    }
    parts.join("  ")
}

pub fn render_card_lines(config: &CardConfig, width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    let task = config.task;

    if config.is_ghost {
        let dots = "·".repeat(width.min(3));
        return vec![
            Line::from(Span::styled(dots, ghost_text())),
            Line::default(),
            Line::default(),
        ];
    }

    let base = selected_item(config.is_selected && config.is_focused);
    let title_style = if config.is_selected {
        bold_highlight().patch(base)
    } else {
        normal_text().patch(base)
    };

    let title = Line::from(vec![
        Span::styled("● ", priority_style(task.priority).patch(base)),
        Span::styled(truncate(&task.content, width.saturating_sub(2)), title_style),
    ]);

    let description = Line::from(Span::styled(
        truncate(task.description.as_deref().unwrap_or_default(), width),
        label_text().patch(base),
    ));

    let mut footer: Vec<Span<'static>> = Vec::new();
    let tags = task
        .tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    let meta = metadata_text(task);
    let tags_room = width.saturating_sub(meta.chars().count() + 1);
    if !tags.is_empty() {
        footer.push(Span::styled(truncate(&tags, tags_room), tag_style().patch(base)));
    }
    if !meta.is_empty() {
        if !footer.is_empty() {
            footer.push(Span::styled(" ", base));
        }
        footer.push(Span::styled(meta, label_text().patch(base)));
    }

    vec![title, description, Line::from(footer)]
}
