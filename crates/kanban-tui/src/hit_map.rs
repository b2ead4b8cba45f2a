//! Screen regions of the last rendered frame, used to resolve pointer input
//! and to feed collision detection while dragging.

use kanban_domain::{DragItem, Droppable, Point, Rect as DropRect};
use ratatui::layout::Rect;

pub fn to_drop_rect(area: Rect) -> DropRect {
    DropRect::new(
        f64::from(area.x),
        f64::from(area.y),
        f64::from(area.width),
        f64::from(area.height),
    )
}

/// Converts a drop rect back to terminal cells, clipped to `bounds`.
pub fn to_cell_rect(rect: DropRect, bounds: Rect) -> Rect {
    let max_x = f64::from(bounds.right().saturating_sub(1));
    let max_y = f64::from(bounds.bottom().saturating_sub(1));
    let x = rect.left.round().clamp(f64::from(bounds.x), max_x) as u16;
    let y = rect.top.round().clamp(f64::from(bounds.y), max_y) as u16;
    let width = (rect.width.round() as u16).min(bounds.right().saturating_sub(x));
    let height = (rect.height.round() as u16).min(bounds.bottom().saturating_sub(y));
    Rect::new(x, y, width, height)
}

pub fn cell_point(column: u16, row: u16) -> Point {
    Point::new(f64::from(column), f64::from(row))
}

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    droppables: Vec<Droppable>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.droppables.clear();
    }

    pub fn push(&mut self, item: DragItem, area: Rect) {
        self.droppables.push(Droppable::new(item, to_drop_rect(area)));
    }

    /// Regions in render order: each column followed by its cards.
    pub fn droppables(&self) -> &[Droppable] {
        &self.droppables
    }

    pub fn rect_of(&self, item: &DragItem) -> Option<DropRect> {
        self.droppables
            .iter()
            .find(|d| &d.item == item)
            .map(|d| d.rect)
    }

    /// Innermost region under `point`; a card wins over the column holding it.
    pub fn item_at(&self, point: Point) -> Option<&DragItem> {
        self.droppables
            .iter()
            .rev()
            .find(|d| d.rect.contains(point))
            .map(|d| &d.item)
    }
}
