//! Game session state
//!
//! The session exclusively owns the agent and the obstacle collection. The
//! only value that outlives a round is the best score.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::obstacle::{Obstacle, ObstacleKind};
use super::random::{RandomSource, seeded};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start input; nothing ticks
    Idle,
    /// Active gameplay
    Playing,
    /// Round ended on contact; frozen until restart
    GameOver,
}

/// Things that happened during the last tick (for logging, audio, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Jumped,
    Spawned { kind: ObstacleKind },
    SpeedUp { speed: f32 },
    GameOver { score: u64, new_best: bool },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    /// Balance knobs for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Score for the current round
    pub score: u64,
    /// Best score across rounds (persisted by the host)
    pub best_score: u64,
    /// Scroll speed in pixels/frame
    pub speed: f32,
    /// Playing frames elapsed this round
    pub frame: u64,
    /// The player
    pub agent: Agent,
    /// Live obstacles in spawn order (front = oldest, left-most)
    pub obstacles: Vec<Obstacle>,
    /// Events emitted by the last tick
    pub events: Vec<GameEvent>,
    /// Randomness for spawning and obstacle geometry
    rng: R,
}

impl GameState<Pcg32> {
    /// Create a new session with a seeded generator
    pub fn new(tuning: Tuning, seed: u64, best_score: u64) -> Self {
        Self::with_rng(tuning, seeded(seed), best_score)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new session with an explicit random source
    ///
    /// `tuning` must pass `Tuning::validate` (zero frame intervals would
    /// divide by zero in the step).
    pub fn with_rng(tuning: Tuning, rng: R, best_score: u64) -> Self {
        debug_assert!(
            tuning.validate().is_ok(),
            "invalid tuning: {:?}",
            tuning.validate().err()
        );
        let agent = Agent::new(&tuning);
        let speed = tuning.base_speed;
        Self {
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            best_score,
            speed,
            frame: 0,
            agent,
            obstacles: Vec::new(),
            events: Vec::new(),
            rng,
        }
    }

    /// Reset everything a round owns; best score and the RNG stream carry over
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.speed = self.tuning.base_speed;
        self.frame = 0;
        self.agent = Agent::new(&self.tuning);
        self.obstacles.clear();
    }

    /// Split borrow used by the tick: obstacles and the RNG at the same time
    pub(crate) fn spawn_parts(&mut self) -> (&[Obstacle], &Tuning, &mut R) {
        (&self.obstacles, &self.tuning, &mut self.rng)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Whether the last tick ended the round with a new best
    pub fn new_best_this_tick(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { new_best: true, .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(Tuning::default(), 1, 42);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 42);
        assert_eq!(state.speed, state.tuning.base_speed);
        assert!(state.obstacles.is_empty());
        assert!(state.agent.grounded);
        assert_eq!(
            state.agent.pos.y,
            state.tuning.ground_y - state.tuning.stand_height
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid tuning")]
    fn test_rejects_zero_score_interval() {
        let tuning = Tuning {
            score_interval_frames: 0,
            ..Default::default()
        };
        let _ = GameState::new(tuning, 1, 0);
    }

    #[test]
    fn test_reset_round_keeps_best() {
        let mut state = GameState::new(Tuning::default(), 1, 10);
        state.score = 99;
        state.best_score = 99;
        state.speed = 9.0;
        state.frame = 1234;
        state.agent.pos.y = 20.0;
        state.agent.grounded = false;

        state.reset_round();
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 99);
        assert_eq!(state.speed, state.tuning.base_speed);
        assert_eq!(state.frame, 0);
        assert_eq!(state.agent, Agent::new(&state.tuning));
    }
}
