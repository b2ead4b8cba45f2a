//! Task search.
//!
//! The board view filters the global task sequence through a `TaskSearcher`,
//! so the TUI search bar and `task list --query` share one notion of "matches".

use crate::Task;

/// Trait for searching tasks.
pub trait TaskSearcher {
    /// Returns true if the task matches the search criteria.
    fn matches(&self, task: &Task) -> bool;
}

impl<F> TaskSearcher for F
where
    F: Fn(&Task) -> bool,
{
    fn matches(&self, task: &Task) -> bool {
        self(task)
    }
}

/// Search tasks by content (case-insensitive substring).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSearcher {
    query: String,
}

impl ContentSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }

    /// Get the (lowercased) search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

impl TaskSearcher for ContentSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.content.to_lowercase().contains(&self.query)
    }
}
