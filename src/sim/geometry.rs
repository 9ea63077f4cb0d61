//! Axis-aligned rectangle and circle intersection tests
//!
//! Coordinates are screen-style: origin at the top-left, +y pointing down.
//! A rectangle is described by its top-left corner and its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Circle overlap using the closest point on the rectangle (touching counts)
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min(), self.max());
        (center - closest).length_squared() <= radius * radius
    }
}

/// Check whether a circle overlaps a rectangle
#[inline]
pub fn circle_rect_collide(center: Vec2, radius: f32, rect: &Rect) -> bool {
    rect.intersects_circle(center, radius)
}

/// Check whether two rectangles overlap
#[inline]
pub fn rect_rect_collide(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}
