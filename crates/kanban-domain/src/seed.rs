//! Board contents used when nothing usable is persisted.

use crate::{Column, Id, Priority, Task};

pub fn default_columns() -> Vec<Column> {
    vec![
        Column::with_id("todo", "To Do"),
        Column::with_id("in-progress", "In Progress"),
        Column::with_id("review", "Review"),
        Column::with_id("done", "Done"),
    ]
}

pub fn default_tasks() -> Vec<Task> {
    const AVATAR: &str = "https://github.com/shadcn.png";
    vec![
        Task {
            id: Id::from("1"),
            column_id: Id::from("todo"),
            content: "Design new landing page".to_string(),
            description: Some(
                "Create high-fidelity mockups for the new landing page including hero section and features."
                    .to_string(),
            ),
            priority: Priority::High,
            tags: vec!["Design".to_string(), "Marketing".to_string()],
            comments: 3,
            attachments: 2,
            due_date: Some("Tomorrow".to_string()),
            assignees: vec![AVATAR.to_string(), AVATAR.to_string()],
        },
        Task {
            id: Id::from("2"),
            column_id: Id::from("todo"),
            content: "Competitor analysis".to_string(),
            description: Some("Analyze top 5 competitors and identify gaps in the market.".to_string()),
            priority: Priority::Medium,
            tags: vec!["Research".to_string()],
            comments: 1,
            attachments: 0,
            due_date: Some("Next Week".to_string()),
            assignees: vec![AVATAR.to_string()],
        },
    ]
}
