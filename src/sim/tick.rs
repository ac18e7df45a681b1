//! One simulation step
//!
//! Core game loop that advances the session deterministically. Order inside
//! a playing step: agent input, agent physics, spawn, obstacle scroll and
//! collision, retirement, counters, then the game-over transition.

use super::collision::agent_hits_obstacle;
use super::random::RandomSource;
use super::spawn::maybe_spawn;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick
///
/// Held flags reflect the last key state seen before the tick; `start` is a
/// one-shot edge that only matters in `Idle` and `GameOver`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key held
    pub jump: bool,
    /// Crouch key held
    pub crouch: bool,
    /// Start/restart pressed since the last tick
    pub start: bool,
}

/// Advance the session by one step
pub fn tick<R: RandomSource>(state: &mut GameState<R>, input: &TickInput) {
    state.events.clear();

    match state.phase {
        GamePhase::Idle => {
            if input.start {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Started);
                log::info!("Run started");
            }
        }

        GamePhase::GameOver => {
            if input.start {
                state.reset_round();
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Restarted);
                log::info!("Run restarted (best {})", state.best_score);
            }
        }

        GamePhase::Playing => step_playing(state, input),
    }
}

fn step_playing<R: RandomSource>(state: &mut GameState<R>, input: &TickInput) {
    // --- AGENT ---
    let tuning = &state.tuning;
    if state.agent.apply_input(input.crouch, input.jump, tuning) {
        state.events.push(GameEvent::Jumped);
    }
    state.agent.integrate(tuning);

    // --- SPAWN ---
    let speed = state.speed;
    let (live, tuning, rng) = state.spawn_parts();
    if let Some(obstacle) = maybe_spawn(live, speed, tuning, rng) {
        log::debug!(
            "Spawned {} x{} at frame {}",
            obstacle.kind.as_str(),
            obstacle.cluster,
            state.frame
        );
        state.events.push(GameEvent::Spawned {
            kind: obstacle.kind,
        });
        state.obstacles.push(obstacle);
    }

    // --- SCROLL + COLLIDE ---
    let mut collided = false;
    for obstacle in &mut state.obstacles {
        obstacle.step(speed);
        if agent_hits_obstacle(&state.agent, obstacle, &state.tuning) {
            collided = true;
        }
    }
    state.obstacles.retain(|o| !o.retired);

    // --- COUNTERS ---
    state.frame += 1;
    if state.frame % state.tuning.score_interval_frames == 0 {
        state.score += 1;
    }
    if state.frame % state.tuning.speed_interval_frames == 0 {
        state.speed += state.tuning.speed_step;
        log::debug!("Speed up to {:.1} at frame {}", state.speed, state.frame);
        state.events.push(GameEvent::SpeedUp { speed: state.speed });
    }

    // --- GAME OVER ---
    if collided {
        state.phase = GamePhase::GameOver;
        let new_best = state.score > state.best_score;
        if new_best {
            state.best_score = state.score;
        }
        log::info!(
            "Game over: score {} (best {}{})",
            state.score,
            state.best_score,
            if new_best { ", new best" } else { "" }
        );
        state.events.push(GameEvent::GameOver {
            score: state.score,
            new_best,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::{Obstacle, ObstacleKind};
    use crate::sim::random::ScriptedRandom;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const START: TickInput = TickInput {
        jump: false,
        crouch: false,
        start: true,
    };

    /// Tick and then sweep the field, so the run proceeds with no obstacles present
    fn tick_empty(state: &mut GameState<ScriptedRandom>) {
        tick(state, &TickInput::default());
        state.obstacles.clear();
    }

    fn playing(tuning: Tuning, best: u64) -> GameState<ScriptedRandom> {
        let rng = ScriptedRandom::new(&[0.3, 0.1, 0.5, 0.5]);
        let mut state = GameState::with_rng(tuning, rng, best);
        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn overlapping_obstacle(state: &GameState<ScriptedRandom>) -> Obstacle {
        let agent = &state.agent;
        // Placed so it is still on the agent after one scroll step
        Obstacle::with_geometry(
            ObstacleKind::TallBarrier,
            Vec2::new(agent.pos.x + state.speed, agent.pos.y),
            agent.size,
            1,
        )
    }

    #[test]
    fn test_idle_until_start() {
        let mut state = GameState::new(Tuning::default(), 7, 0);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.agent.grounded);
        assert_eq!(
            state.agent.pos.y,
            state.tuning.ground_y - state.tuning.stand_height
        );

        // Jump and crouch do nothing while idle
        let held = TickInput {
            jump: true,
            crouch: true,
            start: false,
        };
        for _ in 0..10 {
            tick(&mut state, &held);
        }
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.frame, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.agent.grounded);
        assert!(!state.agent.crouching);

        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Started]);
        // The start step itself does not simulate
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_jump_while_playing() {
        let mut state = playing(Tuning::default(), 0);
        let y0 = state.agent.pos.y;

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert!(!state.agent.grounded);
        assert!(state.agent.pos.y < y0);
        assert!(state.events.contains(&GameEvent::Jumped));

        // Holding jump mid-air has no effect
        let y1 = state.agent.pos.y;
        let v1 = state.agent.vel_y;
        tick(&mut state, &jump);
        assert!(!state.events.contains(&GameEvent::Jumped));
        assert_eq!(state.agent.vel_y, v1 + state.tuning.gravity);
        assert!(state.agent.pos.y < y1);
    }

    #[test]
    fn test_500_frames_without_obstacles() {
        let mut state = playing(Tuning::default(), 0);
        let base = state.speed;

        for _ in 0..500 {
            tick_empty(&mut state);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 500);
        assert_eq!(state.score, 100);
        assert_eq!(state.speed, base + state.tuning.speed_step);
        assert!(state.events.contains(&GameEvent::SpeedUp { speed: state.speed }));
    }

    #[test]
    fn test_collision_ends_round_on_that_step() {
        let mut state = playing(Tuning::default(), 1_000);
        for _ in 0..9 {
            tick_empty(&mut state);
        }
        let blocker = overlapping_obstacle(&state);
        state.obstacles.push(blocker);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        // The colliding step still counts
        assert_eq!(state.frame, 10);
        assert_eq!(state.score, 2);
        assert_eq!(state.best_score, 1_000);
        assert!(state.events.contains(&GameEvent::GameOver {
            score: 2,
            new_best: false
        }));

        // Frozen: nothing moves without a restart
        let frozen_x = state.obstacles[0].pos.x;
        for _ in 0..20 {
            tick(
                &mut state,
                &TickInput {
                    jump: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.frame, 10);
        assert_eq!(state.score, 2);
        assert_eq!(state.obstacles[0].pos.x, frozen_x);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_collision_updates_best_when_exceeded() {
        let mut state = playing(Tuning::default(), 1);
        for _ in 0..19 {
            tick_empty(&mut state);
        }
        let blocker = overlapping_obstacle(&state);
        state.obstacles.push(blocker);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 4);
        assert_eq!(state.best_score, 4);
        assert!(state.new_best_this_tick());
    }

    #[test]
    fn test_restart_resets_round() {
        let mut state = playing(Tuning::default(), 0);
        for _ in 0..600 {
            tick_empty(&mut state);
        }
        let blocker = overlapping_obstacle(&state);
        state.obstacles.push(blocker);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        let best = state.best_score;
        assert_eq!(best, 120);

        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Restarted]);
        assert_eq!(state.frame, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, state.tuning.base_speed);
        assert!(state.obstacles.is_empty());
        assert!(state.agent.grounded);
        assert_eq!(state.best_score, best);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = playing(Tuning::default(), 0);
        for _ in 0..10 {
            tick_empty(&mut state);
        }
        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 11);
    }

    #[test]
    fn test_retired_obstacles_are_removed() {
        let mut state = playing(Tuning::default(), 0);
        // Fully off-screen after one scroll step
        let leaving = Obstacle::with_geometry(
            ObstacleKind::LowBarrier,
            Vec2::new(-18.0, state.agent.pos.y),
            Vec2::new(20.0, 40.0),
            1,
        );
        state.obstacles.push(leaving);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.obstacles.iter().all(|o| !o.retired && o.right() >= 0.0));
        // Only the fresh spawn at the right edge remains
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_first_playing_step_spawns() {
        let mut state = playing(Tuning::default(), 0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        let first = &state.obstacles[0];
        // Spawned at the right edge and scrolled once in the same step
        assert_eq!(first.pos.x, state.tuning.field_width - state.tuning.base_speed);
        assert!(state.events.contains(&GameEvent::Spawned { kind: first.kind }));
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs evolve identically
        let mut a = GameState::new(Tuning::default(), 99_999, 0);
        let mut b = GameState::new(Tuning::default(), 99_999, 0);

        let mut inputs = vec![START];
        for i in 0..3_000u32 {
            inputs.push(TickInput {
                jump: i % 37 < 3,
                crouch: i % 53 > 40,
                start: i % 400 == 0,
            });
        }
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.best_score, b.best_score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.agent, b.agent);
    }
}
