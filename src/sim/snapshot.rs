//! Read-only view of a session for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::obstacle::ObstacleKind;
use super::state::{GamePhase, GameState};
use crate::consts::{FLAP_ANIM_FRAMES, RUN_ANIM_FRAMES};

/// Agent pose as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentView {
    pub pos: Vec2,
    pub size: Vec2,
    pub crouching: bool,
    pub grounded: bool,
}

/// One obstacle as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub cluster: u32,
}

/// Everything a renderer may read after a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub frame: u64,
    pub field: Vec2,
    pub ground_y: f32,
    pub agent_margin: f32,
    pub obstacle_margin: f32,
    pub agent: AgentView,
    /// Spawn order (front = oldest)
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture<R>(state: &GameState<R>) -> Self {
        let agent = &state.agent;
        Self {
            phase: state.phase,
            score: state.score,
            best_score: state.best_score,
            frame: state.frame,
            field: Vec2::new(state.tuning.field_width, state.tuning.field_height),
            ground_y: state.tuning.ground_y,
            agent_margin: state.tuning.agent_margin,
            obstacle_margin: state.tuning.obstacle_margin,
            agent: AgentView {
                pos: agent.pos,
                size: agent.size,
                crouching: agent.crouching,
                grounded: agent.grounded,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    pos: o.pos,
                    size: o.size,
                    cluster: o.cluster,
                })
                .collect(),
        }
    }

    /// Running-legs pose (alternates every few frames)
    pub fn run_phase(&self) -> u64 {
        (self.frame / RUN_ANIM_FRAMES) % 2
    }

    /// Wing pose for flyers (slower than the run cycle)
    pub fn flap_phase(&self) -> u64 {
        (self.frame / FLAP_ANIM_FRAMES) % 2
    }

    /// Serialize for debugging overlays or replays
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(Tuning::default(), 3, 17);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        for _ in 0..12 {
            tick(&mut state, &TickInput::default());
        }

        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.frame, 12);
        assert_eq!(snapshot.best_score, 17);
        assert_eq!(snapshot.agent.pos, state.agent.pos);
        assert_eq!(snapshot.obstacles.len(), state.obstacles.len());
        assert_eq!(snapshot.obstacles[0].pos, state.obstacles[0].pos);
        assert_eq!(snapshot.run_phase(), 0);
        assert_eq!(snapshot.flap_phase(), 1);
    }

    #[test]
    fn test_json_contains_phase() {
        let state = GameState::new(Tuning::default(), 3, 0);
        let json = Snapshot::capture(&state).to_json().unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
    }
}
