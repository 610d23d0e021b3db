//! Axis-aligned rectangle geometry for collision shapes
//!
//! Screen coordinates: x grows right, y grows down. A rectangle's `x`/`y` is
//! its top-left corner, matching how entity positions are authored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of `size` with its top-left corner at `pos`
    #[inline]
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.w / 2.0, self.h / 2.0)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Signed penetration of `other` into `self` along the shallowest axis.
    ///
    /// The vector points from `other` toward `self`, so a positive `y` means
    /// `other` sits above `self` and presses down on it. Adding the vector to
    /// `self`'s position separates the two. Touching edges are not a contact.
    pub fn overlap(&self, other: &Rect) -> Option<Vec2> {
        let delta = self.center() - other.center();
        let reach = self.half_extents() + other.half_extents();
        let depth_x = reach.x - delta.x.abs();
        let depth_y = reach.y - delta.y.abs();
        if depth_x <= 0.0 || depth_y <= 0.0 {
            return None;
        }

        let sign = |d: f32| if d < 0.0 { -1.0 } else { 1.0 };
        if depth_x < depth_y {
            Some(Vec2::new(depth_x * sign(delta.x), 0.0))
        } else {
            Some(Vec2::new(0.0, depth_y * sign(delta.y)))
        }
    }
}
