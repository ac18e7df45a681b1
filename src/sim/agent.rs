//! The player-controlled cat
//!
//! The agent never moves horizontally: it runs in place on the ground line
//! while the world scrolls past. Input is applied before integration each
//! step, so a jump pressed this frame already moves the agent this frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// The agent entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Top-left corner (x is fixed for the whole round)
    pub pos: Vec2,
    /// Width and current height (height is one of the two profiles)
    pub size: Vec2,
    /// Vertical velocity in pixels/frame (negative = upward)
    pub vel_y: f32,
    /// Resting on the ground line
    pub grounded: bool,
    /// Crouch held
    pub crouching: bool,
}

impl Agent {
    /// A freshly constructed agent standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.agent_x, tuning.ground_y - tuning.stand_height),
            size: Vec2::new(tuning.agent_width, tuning.stand_height),
            vel_y: 0.0,
            grounded: true,
            crouching: false,
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Bottom edge of the agent
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Un-shrunk bounding box
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Apply held input. Returns true if a jump was initiated this call.
    ///
    /// Crouching swaps the height profile immediately, but the agent is only
    /// re-anchored to the ground while grounded; mid-air the new height takes
    /// effect on landing.
    pub fn apply_input(&mut self, crouch_held: bool, jump_held: bool, tuning: &Tuning) -> bool {
        self.crouching = crouch_held;
        self.size.y = tuning.agent_height(crouch_held);

        if self.grounded {
            self.pos.y = tuning.ground_y - self.size.y;
        }

        if jump_held && self.grounded {
            self.vel_y = -tuning.jump_force;
            self.grounded = false;
            return true;
        }
        false
    }

    /// Advance vertical motion by one frame
    pub fn integrate(&mut self, tuning: &Tuning) {
        self.pos.y += self.vel_y;

        if self.feet_y() < tuning.ground_y {
            // Airborne: no terminal velocity
            self.vel_y += tuning.gravity;
            self.grounded = false;
        } else {
            self.vel_y = 0.0;
            self.grounded = true;
            self.pos.y = tuning.ground_y - self.size.y;
        }
    }
}
