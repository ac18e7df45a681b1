//! Cat Runner - an endless-runner obstacle-avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (agent physics, spawning, collisions, session state)
//! - `driver`: Frame driver that steps the session and persists the best score
//! - `renderer`: Scene building from read-only snapshots (Canvas2D painter on web)
//! - `platform`: Browser/native platform abstraction (keyboard latch)
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::FrameDriver;
pub use settings::{KeyBindings, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the optional accumulator mode (60 Hz, one frame per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Visible field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 200.0;
    pub const GROUND_Y: f32 = 175.0;

    /// Agent (the cat) - never moves horizontally, the world scrolls past
    pub const AGENT_X: f32 = 50.0;
    pub const AGENT_WIDTH: f32 = 44.0;
    pub const AGENT_STAND_HEIGHT: f32 = 40.0;
    pub const AGENT_CROUCH_HEIGHT: f32 = 25.0;
    pub const JUMP_FORCE: f32 = 11.0;
    /// Downward acceleration per frame while airborne
    pub const GRAVITY: f32 = 0.6;

    /// Scroll speed progression
    pub const BASE_SPEED: f32 = 5.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const SPEED_INTERVAL_FRAMES: u64 = 500;
    pub const SCORE_INTERVAL_FRAMES: u64 = 5;

    /// Spawn spacing: base + U(0, jitter) + speed * per_speed
    pub const SPAWN_GAP_BASE: f32 = 250.0;
    pub const SPAWN_GAP_JITTER: f32 = 200.0;
    pub const SPAWN_GAP_PER_SPEED: f32 = 15.0;

    /// Type roll thresholds
    pub const FLYER_MIN_SPEED: f32 = 5.2;
    pub const FLYER_ROLL: f32 = 0.7;
    pub const TALL_ROLL: f32 = 0.5;

    /// Hitbox fairness margins (shrink on every side)
    pub const AGENT_MARGIN: f32 = 5.0;
    pub const OBSTACLE_MARGIN: f32 = 4.0;

    /// Low barrier (cactus) geometry
    pub const LOW_UNIT_WIDTH: f32 = 20.0;
    pub const LOW_MAX_CLUSTER: u32 = 3;
    pub const LOW_MIN_HEIGHT: f32 = 35.0;
    pub const LOW_MAX_HEIGHT: f32 = 55.0;

    /// Tall barrier (trash can) geometry
    pub const TALL_UNIT_WIDTH: f32 = 30.0;
    pub const TALL_MAX_CLUSTER: u32 = 2;
    pub const TALL_MIN_HEIGHT: f32 = 30.0;
    pub const TALL_MAX_HEIGHT: f32 = 40.0;

    /// Flyer (bird) geometry - altitude is measured above the ground line
    pub const FLYER_WIDTH: f32 = 40.0;
    pub const FLYER_HEIGHT: f32 = 25.0;
    pub const FLYER_MIN_ALTITUDE: f32 = 50.0;
    pub const FLYER_MAX_ALTITUDE: f32 = 70.0;
    /// Flyers close distance faster than ground obstacles
    pub const FLYER_SPEED_MULTIPLIER: f32 = 1.2;

    /// Animation cadence (frames per pose)
    pub const RUN_ANIM_FRAMES: u64 = 6;
    pub const FLAP_ANIM_FRAMES: u64 = 10;
}
