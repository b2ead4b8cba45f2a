/// Partial update of an optional task field.
///
/// - `NoChange`: field keeps its existing value
/// - `Set(value)`: field is replaced
/// - `Clear`: field is removed
///
/// ```
/// use kanban_domain::FieldUpdate;
///
/// let mut due = Some("Tomorrow".to_string());
/// FieldUpdate::Set("Next Week".to_string()).apply_to(&mut due);
/// assert_eq!(due.as_deref(), Some("Next Week"));
///
/// FieldUpdate::Clear.apply_to(&mut due);
/// assert_eq!(due, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }
}

impl FieldUpdate<String> {
    /// Blank text clears the field instead of storing an empty string.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            FieldUpdate::Clear
        } else {
            FieldUpdate::Set(trimmed.to_string())
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
