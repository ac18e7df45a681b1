//! Scrolling obstacles
//!
//! An obstacle may be a cluster of identical sub-units (a row of cacti, a
//! pair of trash cans) that share a single combined hitbox.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::random::RandomSource;
use crate::consts::*;
use crate::tuning::Tuning;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Cactus cluster sitting on the ground
    LowBarrier,
    /// Trash-can cluster sitting on the ground
    TallBarrier,
    /// Bird flying at head height
    Flyer,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::LowBarrier => "cactus",
            ObstacleKind::TallBarrier => "trash can",
            ObstacleKind::Flyer => "bird",
        }
    }

    /// Scroll speed multiplier relative to the session speed
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            ObstacleKind::Flyer => FLYER_SPEED_MULTIPLIER,
            _ => 1.0,
        }
    }

    /// Whether this kind rests on the ground line
    pub fn is_grounded(&self) -> bool {
        !matches!(self, ObstacleKind::Flyer)
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner of the whole cluster
    pub pos: Vec2,
    /// Size of the whole cluster
    pub size: Vec2,
    /// Number of repeated sub-units (>= 1)
    pub cluster: u32,
    /// Set once the right edge scrolls past the left edge of the field
    pub retired: bool,
}

impl Obstacle {
    /// Spawn an obstacle of `kind` at `x` with randomized geometry
    ///
    /// Draw order: cluster size then height for barriers, altitude for flyers.
    pub fn spawn<R: RandomSource + ?Sized>(
        kind: ObstacleKind,
        x: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let ground = tuning.ground_y;
        match kind {
            ObstacleKind::LowBarrier => {
                let cluster = rng.pick(LOW_MAX_CLUSTER) + 1;
                let height = rng.range(LOW_MIN_HEIGHT, LOW_MAX_HEIGHT);
                Self::with_geometry(
                    kind,
                    Vec2::new(x, ground - height),
                    Vec2::new(LOW_UNIT_WIDTH * cluster as f32, height),
                    cluster,
                )
            }
            ObstacleKind::TallBarrier => {
                let cluster = rng.pick(TALL_MAX_CLUSTER) + 1;
                let height = rng.range(TALL_MIN_HEIGHT, TALL_MAX_HEIGHT);
                Self::with_geometry(
                    kind,
                    Vec2::new(x, ground - height),
                    Vec2::new(TALL_UNIT_WIDTH * cluster as f32, height),
                    cluster,
                )
            }
            ObstacleKind::Flyer => {
                let y = rng.range(ground - FLYER_MAX_ALTITUDE, ground - FLYER_MIN_ALTITUDE);
                Self::with_geometry(
                    kind,
                    Vec2::new(x, y),
                    Vec2::new(FLYER_WIDTH, FLYER_HEIGHT),
                    1,
                )
            }
        }
    }

    /// Build an obstacle with explicit geometry
    pub fn with_geometry(kind: ObstacleKind, pos: Vec2, size: Vec2, cluster: u32) -> Self {
        Self {
            kind,
            pos,
            size,
            cluster: cluster.max(1),
            retired: false,
        }
    }

    /// Combined hitbox spanning the whole cluster
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Width of a single sub-unit
    pub fn unit_width(&self) -> f32 {
        self.size.x / self.cluster as f32
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Scroll left by one frame at the session speed
    pub fn step(&mut self, speed: f32) {
        self.pos.x -= speed * self.kind.speed_multiplier();
        if self.right() < 0.0 {
            self.retired = true;
        }
    }
}
