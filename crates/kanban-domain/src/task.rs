use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::column::ColumnId;
use crate::field_update::FieldUpdate;
use crate::id::Id;

pub type TaskId = Id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}', expected low, medium or high", other)),
        }
    }
}

/// A unit of work. Its position on the board is its index in the global task sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub column_id: ColumnId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub attachments: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
}

impl Task {
    pub fn new(column_id: ColumnId, content: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            column_id,
            content: content.into(),
            description: None,
            priority: Priority::default(),
            tags: Vec::new(),
            comments: 0,
            attachments: 0,
            due_date: None,
            assignees: Vec::new(),
        }
    }

    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(content) = update.content {
            self.content = content;
        }
        update.description.apply_to(&mut self.description);
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(tags) = update.tags {
            self.tags = dedup_tags(tags);
        }
        update.due_date.apply_to(&mut self.due_date);
    }
}

/// Pushes `tag` (trimmed) onto `tags` if it is non-blank and not yet present.
pub fn push_unique_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let tag = tag.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

/// Drops blank and repeated tags, keeping first-seen order.
pub fn dedup_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = Vec::new();
    for tag in tags {
        push_unique_tag(&mut out, &tag);
    }
    out
}

/// Input for creating a task. Everything but `content` is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub column_id: Option<ColumnId>,
    pub content: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn in_column(mut self, column_id: impl Into<ColumnId>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update merged into an existing task. Column and position are not
/// editable here; they change only through reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub content: Option<String>,
    pub description: FieldUpdate<String>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub due_date: FieldUpdate<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(Id::from("todo"), "Write tests");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.tags.is_empty());
        assert_eq!(task.comments, 0);
        assert_eq!(task.attachments, 0);
        assert!(task.assignees.is_empty());
    }

    #[test]
    fn test_push_unique_tag_dedupes_and_trims() {
        let mut tags = Vec::new();
        assert!(push_unique_tag(&mut tags, " Design "));
        assert!(!push_unique_tag(&mut tags, "Design"));
        assert!(!push_unique_tag(&mut tags, "   "));
        assert!(push_unique_tag(&mut tags, "Marketing"));
        assert_eq!(tags, vec!["Design", "Marketing"]);
        assert_eq!(dedup_tags(vec![" a".into(), "a".into(), "".into()]), vec!["a"]);
    }

    #[test]
    fn test_apply_update_merges_fields() {
        let mut task = Task::new(Id::from("todo"), "Old");
        task.description = Some("keep?".to_string());
        task.due_date = Some("Tomorrow".to_string());

        task.apply(TaskUpdate {
            content: Some("New".to_string()),
            priority: Some(Priority::High),
            tags: Some(vec!["a".into(), "a".into(), "b".into()]),
            due_date: FieldUpdate::Clear,
            ..Default::default()
        });

        assert_eq!(task.content, "New");
        assert_eq!(task.description.as_deref(), Some("keep?"));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["a", "b"]);
        assert!(task.due_date.is_none());
        assert_eq!(task.column_id, "todo");
    }

    #[test]
    fn test_priority_parsing_and_cycle() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::High.next(), Priority::Low);
        assert_eq!(Priority::Low.prev(), Priority::High);
    }

    #[test]
    fn test_reads_reference_json_layout() {
        let json = r#"{
            "id": "1",
            "columnId": "todo",
            "content": "Design new landing page",
            "priority": "high",
            "tags": ["Design", "Marketing"],
            "comments": 3,
            "attachments": 2,
            "dueDate": "Tomorrow",
            "description": "Create high-fidelity mockups",
            "assignees": ["https://github.com/shadcn.png"]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.column_id, "todo");
        assert_eq!(task.due_date.as_deref(), Some("Tomorrow"));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.assignees.len(), 1);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let task: Task =
            serde_json::from_str(r#"{"id": 7, "columnId": "done", "content": "x"}"#).unwrap();
        assert_eq!(task.id, "7");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.tags.is_empty());
    }
}
