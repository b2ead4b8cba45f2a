//! Task editing form shared by the create and edit modals.

use kanban_core::{InputState, KanbanError, KanbanResult};

use crate::task::push_unique_tag;
use crate::{BoardRepository, BoardStore, ColumnId, FieldUpdate, NewTask, Priority, Task, TaskId, TaskUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create { column_id: ColumnId },
    Edit { task_id: TaskId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Tags,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Tags,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Tags => "Tags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Created(Task),
    Updated(Task),
    /// The task being edited was deleted while the form was open.
    Missing,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    mode: FormMode,
    pub title: InputState,
    pub description: InputState,
    pub tag_input: InputState,
    pub priority: Priority,
    tags: Vec<String>,
    /// Chip highlighted for removal while the tag input is empty.
    selected_tag: Option<usize>,
    focus: FormField,
    error: Option<String>,
}

impl TaskForm {
    pub fn for_create(column_id: impl Into<ColumnId>) -> Self {
        Self {
            mode: FormMode::Create {
                column_id: column_id.into(),
            },
            title: InputState::new(),
            description: InputState::new(),
            tag_input: InputState::new(),
            priority: Priority::default(),
            tags: Vec::new(),
            selected_tag: None,
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn for_edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit {
                task_id: task.id.clone(),
            },
            title: InputState::with_text(task.content.clone()),
            description: InputState::with_text(task.description.clone().unwrap_or_default()),
            tag_input: InputState::new(),
            priority: task.priority,
            tags: task.tags.clone(),
            selected_tag: None,
            focus: FormField::Title,
            error: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
        self.selected_tag = None;
    }

    pub fn next_field(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn prev_field(&mut self) {
        self.set_focus(self.focus.prev());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Text buffer of the focused field; `None` while priority is focused.
    pub fn focused_input_mut(&mut self) -> Option<&mut InputState> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Tags => Some(&mut self.tag_input),
            FormField::Priority => None,
        }
    }

    /// Adds the trimmed tag input as a tag. Blank input is left untouched;
    /// otherwise the input is cleared even if the tag was already present.
    pub fn commit_tag(&mut self) -> bool {
        if self.tag_input.is_blank() {
            return false;
        }
        let added = push_unique_tag(&mut self.tags, self.tag_input.trimmed());
        self.tag_input.clear();
        self.selected_tag = None;
        added
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.clamp_tag_selection();
        self.tags.len() != before
    }

    pub fn pop_tag(&mut self) -> Option<String> {
        let popped = self.tags.pop();
        self.clamp_tag_selection();
        popped
    }

    pub fn selected_tag(&self) -> Option<usize> {
        self.selected_tag
    }

    /// Moves the chip highlight left, starting from the last chip.
    pub fn select_prev_tag(&mut self) {
        if self.tags.is_empty() {
            return;
        }
        self.selected_tag = Some(match self.selected_tag {
            Some(i) => i.saturating_sub(1),
            None => self.tags.len() - 1,
        });
    }

    /// Moves the chip highlight right; past the last chip it returns to the input.
    pub fn select_next_tag(&mut self) {
        self.selected_tag = match self.selected_tag {
            Some(i) if i + 1 < self.tags.len() => Some(i + 1),
            _ => None,
        };
    }

    pub fn clear_tag_selection(&mut self) {
        self.selected_tag = None;
    }

    /// Removes the highlighted chip. The highlight stays at the same slot, or
    /// moves to the new last chip.
    pub fn remove_selected_tag(&mut self) -> Option<String> {
        let tag = self.tags.get(self.selected_tag?)?.clone();
        self.remove_tag(&tag);
        Some(tag)
    }

    fn clamp_tag_selection(&mut self) {
        self.selected_tag = match self.selected_tag {
            _ if self.tags.is_empty() => None,
            Some(i) => Some(i.min(self.tags.len() - 1)),
            None => None,
        };
    }

    pub fn validate(&mut self) -> KanbanResult<()> {
        if self.title.is_blank() {
            let message = "Title is required".to_string();
            self.error = Some(message.clone());
            self.focus = FormField::Title;
            return Err(KanbanError::Validation(message));
        }
        self.error = None;
        Ok(())
    }

    pub fn submit<R: BoardRepository>(&mut self, store: &mut BoardStore<R>) -> KanbanResult<FormOutcome> {
        self.validate()?;
        let content = self.title.trimmed().to_string();

        match &self.mode {
            FormMode::Create { column_id } => {
                let mut new = NewTask::new(content)
                    .in_column(column_id.clone())
                    .with_priority(self.priority)
                    .with_tags(self.tags.iter().cloned());
                if !self.description.is_blank() {
                    new = new.with_description(self.description.as_str());
                }
                store.create_task(new).map(FormOutcome::Created)
            }
            FormMode::Edit { task_id } => {
                let update = TaskUpdate {
                    content: Some(content),
                    description: FieldUpdate::from_text(self.description.as_str()),
                    priority: Some(self.priority),
                    tags: Some(self.tags.clone()),
                    ..Default::default()
                };
                Ok(store
                    .update_task(task_id, update)
                    .map(FormOutcome::Updated)
                    .unwrap_or(FormOutcome::Missing))
            }
        }
    }

    /// Deletes the edited task. Does nothing for a create form.
    pub fn delete<R: BoardRepository>(&self, store: &mut BoardStore<R>) -> bool {
        match &self.mode {
            FormMode::Edit { task_id } => store.delete_task(task_id),
            FormMode::Create { .. } => false,
        }
    }
}
