//! Axis-aligned collision detection
//!
//! Both boxes are shrunk by a fairness margin on every side before the
//! overlap test, so grazing contact never ends a run. Overlap is strict:
//! shrunk boxes that merely share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::obstacle::Obstacle;
use crate::tuning::Tuning;

/// An axis-aligned box in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Shrink inward by `margin` on every side
    #[inline]
    pub fn shrink(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict interval overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Overlap test between two boxes, each shrunk by its own margin
#[inline]
pub fn boxes_collide(a: Aabb, a_margin: f32, b: Aabb, b_margin: f32) -> bool {
    a.shrink(a_margin).overlaps(&b.shrink(b_margin))
}

/// Check whether the agent touches an obstacle (retired obstacles never do)
pub fn agent_hits_obstacle(agent: &Agent, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    if obstacle.retired {
        return false;
    }
    boxes_collide(
        agent.bounds(),
        tuning.agent_margin,
        obstacle.hitbox(),
        tuning.obstacle_margin,
    )
}
