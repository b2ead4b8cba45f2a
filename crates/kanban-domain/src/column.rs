use serde::{Deserialize, Serialize};

use crate::id::Id;

pub type ColumnId = Id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            title: title.into(),
        }
    }

    pub fn with_id(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
