//! Drag-and-drop over columns and tasks.
//!
//! A gesture is driven either by a pointer (through [`PointerSensor`] and
//! [`closest_corners`]) or by the keyboard (through [`SortKey`]); both end up
//! calling the same [`DragController`] transitions.

mod collision;
mod controller;
mod keyboard;
mod sensor;

pub use collision::{closest_corners, Droppable, Rect};
pub use controller::{DragController, DragOutcome};
pub use keyboard::{keyboard_target, SortKey};
pub use sensor::{Point, PointerEvent, PointerSensor};

use std::fmt;

use crate::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Column,
    Task,
}

/// Something that can be picked up or hovered over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragItem {
    pub kind: EntityKind,
    pub id: Id,
}

impl DragItem {
    pub fn column(id: impl Into<Id>) -> Self {
        Self {
            kind: EntityKind::Column,
            id: id.into(),
        }
    }

    pub fn task(id: impl Into<Id>) -> Self {
        Self {
            kind: EntityKind::Task,
            id: id.into(),
        }
    }

    pub fn is_task(&self) -> bool {
        self.kind == EntityKind::Task
    }

    pub fn is_column(&self) -> bool {
        self.kind == EntityKind::Column
    }
}

impl fmt::Display for DragItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntityKind::Column => write!(f, "column {}", self.id),
            EntityKind::Task => write!(f, "task {}", self.id),
        }
    }
}
