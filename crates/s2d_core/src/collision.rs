//! Axis-aligned rectangle predicates.
//!
//! Both tests are strict: rectangles that only share an edge do not intersect, and a
//! point lying on an edge is not contained. Code that hit-tests the mouse against
//! buttons relies on the second rule.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &FRect) -> bool {
        intersects(*self, *other)
    }

    pub fn contains(&self, point_x: f32, point_y: f32) -> bool {
        contains(*self, point_x, point_y)
    }
}

/// True when the projections of `a` and `b` overlap on both axes.
pub fn intersects(a: FRect, b: FRect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True when the point lies strictly inside all four edges of `rect`.
pub fn contains(rect: FRect, point_x: f32, point_y: f32) -> bool {
    point_x > rect.x && point_x < rect.right() && point_y > rect.y && point_y < rect.bottom()
}
