//! Axis-aligned boxes for lane-space collision
//!
//! Every overlap test in the game goes through `Aabb`: the player's square,
//! obstacle footprints inside a lane, and coin pickup boxes. Overlap is
//! strict, so boxes that only share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Footprint of an obstacle in the lane whose top edge is at `lane_y`.
    ///
    /// Obstacles are centered horizontally on `x` and vertically inside the
    /// lane, with the vertical inset rounded down to whole pixels.
    pub fn for_obstacle(obstacle: &Obstacle, lane_y: f32, lane_height: f32) -> Self {
        let top = lane_y + ((lane_height - obstacle.height) / 2.0).floor();
        let (left, right) = obstacle.span();
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, top + obstacle.height),
        }
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
