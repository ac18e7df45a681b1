//! Data-driven game balance
//!
//! The rule numbers (field, agent physics, progression, spawning, collision
//! margins) live here so a run can be re-tuned from JSON without recompiling.
//! Per-kind obstacle geometry and the flyer speed multiplier stay fixed in
//! `consts`. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must lie in [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("{field} must be at least one frame")]
    ZeroInterval { field: &'static str },
    #[error("crouch height {crouch} must be below stand height {stand}")]
    CrouchNotShorter { crouch: f32, stand: f32 },
    #[error("ground line {ground_y} must lie inside the field height {height}")]
    GroundOutsideField { ground_y: f32, height: f32 },
}

/// Simulation tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub ground_y: f32,

    // === Agent ===
    pub agent_x: f32,
    pub agent_width: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    pub jump_force: f32,
    pub gravity: f32,

    // === Progression ===
    pub base_speed: f32,
    pub speed_step: f32,
    pub speed_interval_frames: u64,
    pub score_interval_frames: u64,

    // === Spawning ===
    pub spawn_gap_base: f32,
    pub spawn_gap_jitter: f32,
    pub spawn_gap_per_speed: f32,
    pub flyer_min_speed: f32,
    pub flyer_roll: f32,
    pub tall_roll: f32,

    // === Collision ===
    pub agent_margin: f32,
    pub obstacle_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_y: GROUND_Y,

            agent_x: AGENT_X,
            agent_width: AGENT_WIDTH,
            stand_height: AGENT_STAND_HEIGHT,
            crouch_height: AGENT_CROUCH_HEIGHT,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,

            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            speed_interval_frames: SPEED_INTERVAL_FRAMES,
            score_interval_frames: SCORE_INTERVAL_FRAMES,

            spawn_gap_base: SPAWN_GAP_BASE,
            spawn_gap_jitter: SPAWN_GAP_JITTER,
            spawn_gap_per_speed: SPAWN_GAP_PER_SPEED,
            flyer_min_speed: FLYER_MIN_SPEED,
            flyer_roll: FLYER_ROLL,
            tall_roll: TALL_ROLL,

            agent_margin: AGENT_MARGIN,
            obstacle_margin: OBSTACLE_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a file path, falling back to defaults on any failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| log::warn!("Cannot read tuning {}: {}", path.display(), e))
            .ok()
            .and_then(|json| {
                Self::from_json(&json)
                    .map_err(|e| log::warn!("Ignoring tuning {}: {}", path.display(), e))
                    .ok()
            });
        match loaded {
            Some(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            None => Self::default(),
        }
    }

    /// Reject tunings the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ground_y", self.ground_y),
            ("agent_width", self.agent_width),
            ("stand_height", self.stand_height),
            ("crouch_height", self.crouch_height),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("base_speed", self.base_speed),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("agent_x", self.agent_x),
            ("speed_step", self.speed_step),
            ("spawn_gap_base", self.spawn_gap_base),
            ("spawn_gap_jitter", self.spawn_gap_jitter),
            ("spawn_gap_per_speed", self.spawn_gap_per_speed),
            ("agent_margin", self.agent_margin),
            ("obstacle_margin", self.obstacle_margin),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        for (field, value) in [("flyer_roll", self.flyer_roll), ("tall_roll", self.tall_roll)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::OutOfUnitRange { field, value });
            }
        }

        if self.speed_interval_frames == 0 {
            return Err(TuningError::ZeroInterval {
                field: "speed_interval_frames",
            });
        }
        if self.score_interval_frames == 0 {
            return Err(TuningError::ZeroInterval {
                field: "score_interval_frames",
            });
        }

        if self.crouch_height >= self.stand_height {
            return Err(TuningError::CrouchNotShorter {
                crouch: self.crouch_height,
                stand: self.stand_height,
            });
        }
        if self.ground_y > self.field_height {
            return Err(TuningError::GroundOutsideField {
                ground_y: self.ground_y,
                height: self.field_height,
            });
        }

        Ok(())
    }

    /// Height of the agent for a given crouch state
    #[inline]
    pub fn agent_height(&self, crouching: bool) -> f32 {
        if crouching {
            self.crouch_height
        } else {
            self.stand_height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.ground_y, 175.0);
        assert_eq!(tuning.agent_height(false), 40.0);
        assert_eq!(tuning.agent_height(true), 25.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 7.5, "gravity": 0.8 }"#).unwrap();
        assert_eq!(tuning.base_speed, 7.5);
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
        assert_eq!(tuning.speed_interval_frames, SPEED_INTERVAL_FRAMES);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "gravity": 0.0 }"#),
            Err(TuningError::NotPositive { field: "gravity", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "crouch_height": 50.0 }"#),
            Err(TuningError::CrouchNotShorter { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "flyer_roll": 1.5 }"#),
            Err(TuningError::OutOfUnitRange { field: "flyer_roll", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "score_interval_frames": 0 }"#),
            Err(TuningError::ZeroInterval { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "agent_margin": -1.0 }"#),
            Err(TuningError::Negative { .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
