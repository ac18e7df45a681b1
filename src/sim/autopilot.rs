//! Demo player
//!
//! Plans inputs from the current state so the game can play itself on the
//! title screen or in a headless run. It reacts to the nearest obstacle only
//! and makes no attempt to be optimal.

use glam::Vec2;

use super::collision::{Aabb, boxes_collide};
use super::obstacle::Obstacle;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Frames of warning before a ground obstacle reaches the agent
const JUMP_LEAD_FRAMES: f32 = 9.0;
/// Frames of warning before a flyer reaches the agent
const CROUCH_LEAD_FRAMES: f32 = 14.0;

/// Choose the input for the next tick
pub fn plan<R>(state: &GameState<R>) -> TickInput {
    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => TickInput {
            start: true,
            ..Default::default()
        },
        GamePhase::Playing => plan_playing(state),
    }
}

fn plan_playing<R>(state: &GameState<R>) -> TickInput {
    let agent = &state.agent;
    let agent_right = agent.pos.x + agent.size.x;

    // Nearest obstacle that has not fully passed the agent
    let Some(next) = state
        .obstacles
        .iter()
        .filter(|o| o.right() > agent.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
    else {
        return TickInput::default();
    };

    let distance = next.pos.x - agent_right;
    let closing = state.speed * next.kind.speed_multiplier();

    if next.kind.is_grounded() {
        let jump = agent.grounded && distance <= closing * JUMP_LEAD_FRAMES;
        TickInput {
            jump,
            ..Default::default()
        }
    } else {
        let crouch = threatens_standing(state, next) && distance <= closing * CROUCH_LEAD_FRAMES;
        TickInput {
            crouch,
            ..Default::default()
        }
    }
}

/// Whether a flyer sits low enough to hit a standing agent
fn threatens_standing<R>(state: &GameState<R>, flyer: &Obstacle) -> bool {
    let tuning = &state.tuning;
    let standing = Aabb::from_pos_size(
        Vec2::new(flyer.pos.x, tuning.ground_y - tuning.stand_height),
        Vec2::new(tuning.agent_width, tuning.stand_height),
    );
    boxes_collide(
        standing,
        tuning.agent_margin,
        flyer.hitbox(),
        tuning.obstacle_margin,
    )
}
