use kanban_core::config::DEFAULT_ACTIVATION_DISTANCE;

use super::DragItem;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// The pointer travelled past the activation distance; start the drag.
    Activate { item: DragItem },
    /// Active drag moved; `delta` is measured from the press point.
    Move { item: DragItem, delta: Point },
    Drop { item: DragItem, delta: Point },
    /// Released before activation.
    Click { item: DragItem },
}

#[derive(Debug, Clone)]
struct Press {
    item: DragItem,
    origin: Point,
    activated: bool,
}

/// Turns raw press/move/release input into drag events, holding back
/// activation until the pointer has moved more than `distance` so that a
/// plain click can still open the editor.
#[derive(Debug, Clone)]
pub struct PointerSensor {
    distance: f64,
    press: Option<Press>,
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}

impl PointerSensor {
    pub fn new(distance: f64) -> Self {
        Self {
            distance: distance.max(0.0),
            press: None,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.activated)
    }

    pub fn press(&mut self, item: DragItem, at: Point) {
        self.press = Some(Press {
            item,
            origin: at,
            activated: false,
        });
    }

    pub fn move_to(&mut self, at: Point) -> Option<PointerEvent> {
        let press = self.press.as_mut()?;
        let delta = at.offset_from(press.origin);

        if press.activated {
            return Some(PointerEvent::Move {
                item: press.item.clone(),
                delta,
            });
        }
        if delta.length() > self.distance {
            press.activated = true;
            tracing::debug!("Pointer drag activated for {}", press.item);
            return Some(PointerEvent::Activate {
                item: press.item.clone(),
            });
        }
        None
    }

    pub fn release(&mut self, at: Point) -> Option<PointerEvent> {
        let press = self.press.take()?;
        if press.activated {
            Some(PointerEvent::Drop {
                item: press.item,
                delta: at.offset_from(press.origin),
            })
        } else {
            Some(PointerEvent::Click { item: press.item })
        }
    }

    /// Forgets the current press. Returns whether a drag was active.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some_and(|p| p.activated)
    }
}
