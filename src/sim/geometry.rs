//! Axis-aligned rectangle geometry
//!
//! Every entity embeds one `Rect`. Overlap tests are half-open: boxes that
//! only touch along an edge do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space axis-aligned box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move by a displacement
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Resize while keeping the bottom edge fixed (grows upward)
    pub fn resize_from_bottom(&mut self, width: f32, height: f32) {
        let bottom = self.bottom();
        self.width = width;
        self.height = height;
        self.y = bottom - height;
    }

    /// Closed point containment (edges count)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// True if the two boxes share a column (horizontal spans overlap)
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// AABB overlap with positive area on both axes
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Penetration depth per axis (non-positive components mean no overlap on that axis)
pub fn overlap_depth(a: &Rect, b: &Rect) -> Vec2 {
    let dx = a.right().min(b.right()) - a.left().max(b.left());
    let dy = a.bottom().min(b.bottom()) - a.top().max(b.top());
    Vec2::new(dx, dy)
}

/// Circle vs rectangle: clamp the centre to the box, compare squared distance
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.left(), rect.right()),
        center.y.clamp(rect.top(), rect.bottom()),
    );
    center.distance_squared(closest) < radius * radius
}
