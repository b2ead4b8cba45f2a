use super::{DragItem, Point};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        let right = self.left + self.width;
        let bottom = self.top + self.height;
        [
            Point::new(self.left, self.top),
            Point::new(right, self.top),
            Point::new(self.left, bottom),
            Point::new(right, bottom),
        ]
    }

    pub fn translate(&self, delta: Point) -> Rect {
        Rect::new(self.left + delta.x, self.top + delta.y, self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

/// A drop target and where it currently sits on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    pub item: DragItem,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(item: DragItem, rect: Rect) -> Self {
        Self { item, rect }
    }
}

fn corner_distance(a: &Rect, b: &Rect) -> f64 {
    let total: f64 = a
        .corners()
        .iter()
        .zip(b.corners().iter())
        .map(|(p, q)| p.offset_from(*q).length())
        .sum();
    total / 4.0
}

/// Picks the droppable whose corners are, on average, nearest to the
/// corresponding corners of `dragged`. Ties resolve to the earliest entry.
pub fn closest_corners<'a>(dragged: &Rect, droppables: &'a [Droppable]) -> Option<&'a DragItem> {
    let mut best: Option<(&'a DragItem, f64)> = None;
    for droppable in droppables {
        let distance = corner_distance(dragged, &droppable.rect);
        match best {
            Some((_, current)) if distance >= current => {}
            _ => best = Some((&droppable.item, distance)),
        }
    }
    best.map(|(item, _)| item)
}
