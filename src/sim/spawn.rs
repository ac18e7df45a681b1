//! Procedural obstacle spawning
//!
//! Once per playing step the policy may emit at most one obstacle at the
//! right edge of the field. The minimum gap to the previous obstacle grows
//! with speed, which is the only thing keeping clusters jumpable late in a
//! run.

use super::obstacle::{Obstacle, ObstacleKind};
use super::random::RandomSource;
use crate::tuning::Tuning;

/// Minimum distance the newest obstacle must have travelled from the right
/// edge before another may spawn. Consumes one draw.
pub fn min_gap<R: RandomSource + ?Sized>(speed: f32, tuning: &Tuning, rng: &mut R) -> f32 {
    tuning.spawn_gap_base
        + rng.range(0.0, tuning.spawn_gap_jitter)
        + speed * tuning.spawn_gap_per_speed
}

/// Deterministic part of the gap (what the jitter can never undercut)
pub fn gap_floor(speed: f32, tuning: &Tuning) -> f32 {
    tuning.spawn_gap_base + speed * tuning.spawn_gap_per_speed
}

/// Pick an obstacle type from a uniform roll in `[0, 1)`
///
/// Flyers are gated behind a speed threshold so the opening seconds only
/// contain ground obstacles.
pub fn choose_kind(speed: f32, roll: f32, tuning: &Tuning) -> ObstacleKind {
    if speed > tuning.flyer_min_speed && roll > tuning.flyer_roll {
        ObstacleKind::Flyer
    } else if roll > tuning.tall_roll {
        ObstacleKind::TallBarrier
    } else {
        ObstacleKind::LowBarrier
    }
}

/// Decide whether to emit a new obstacle this step
///
/// `live` is the current obstacle collection in spawn order; its last entry
/// is the most recently spawned obstacle.
pub fn maybe_spawn<R: RandomSource + ?Sized>(
    live: &[Obstacle],
    speed: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Obstacle> {
    let gap = min_gap(speed, tuning, rng);

    let clear = match live.last() {
        None => true,
        Some(last) => tuning.field_width - last.pos.x > gap,
    };
    if !clear {
        return None;
    }

    let kind = choose_kind(speed, rng.unit(), tuning);
    Some(Obstacle::spawn(kind, tuning.field_width, tuning, rng))
}
