//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick, no wall-clock time
//! - Injected, seedable randomness only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod agent;
pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod random;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use agent::Agent;
pub use collision::{Aabb, agent_hits_obstacle, boxes_collide};
pub use obstacle::{Obstacle, ObstacleKind};
pub use random::{RandomSource, seeded};
pub use snapshot::{AgentView, ObstacleView, Snapshot};
pub use spawn::{choose_kind, gap_floor, maybe_spawn, min_gap};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
