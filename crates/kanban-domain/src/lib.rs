pub mod board;
pub mod column;
pub mod drag;
pub mod field_update;
pub mod form;
pub mod id;
pub mod navigation;
pub mod ordering;
pub mod repository;
pub mod search;
pub mod seed;
pub mod store;
pub mod task;
pub mod view;

pub use board::Board;
pub use column::{Column, ColumnId};
pub use drag::{
    closest_corners, DragController, DragItem, DragOutcome, Droppable, EntityKind, Point,
    PointerEvent, PointerSensor, Rect, SortKey,
};
pub use field_update::FieldUpdate;
pub use form::{FormField, FormMode, FormOutcome, TaskForm};
pub use id::Id;
pub use navigation::{Navigator, HOME_VIEW};
pub use repository::{BoardRepository, SessionRepository};
pub use search::{ContentSearcher, TaskSearcher};
pub use store::BoardStore;
pub use task::{NewTask, Priority, Task, TaskId, TaskUpdate};
pub use view::BoardView;
