//! Obstacle spawning
//!
//! Spawn cadence tightens with level down to a floor. The cactus/bird pick
//! is the only random draw in the simulation, so the RNG is passed in.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Minimum ticks between spawns: `max(floor, base - level * step)`
pub fn spawn_gap(level: u32, tuning: &Tuning) -> u64 {
    let shrink = u64::from(level).saturating_mul(tuning.spawn_gap_step);
    tuning
        .spawn_gap_base
        .saturating_sub(shrink)
        .max(tuning.spawn_gap_floor)
}

/// Weighted variant pick: a draw above `aerial_chance` is a cactus
pub fn choose_kind<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> ObstacleKind {
    let roll: f32 = rng.random();
    if roll > tuning.aerial_chance {
        ObstacleKind::ground(tuning)
    } else {
        ObstacleKind::aerial(tuning)
    }
}

/// Spawn one obstacle if the gap since the last spawn has elapsed
///
/// Must run after the tick counter advanced. Returns the new obstacle's id.
pub fn maybe_spawn<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<u32> {
    let gap = spawn_gap(state.level, &state.tuning);
    if state.time_ticks - state.last_spawn_tick <= gap {
        return None;
    }

    let kind = choose_kind(rng, &state.tuning);
    let id = state.next_entity_id();
    let obstacle = Obstacle::spawn(id, kind, &state.tuning);
    log::debug!(
        "Spawned {:?} #{} at tick {} (gap {})",
        kind,
        id,
        state.time_ticks,
        gap
    );
    state.obstacles.push(obstacle);
    state.last_spawn_tick = state.time_ticks;
    Some(id)
}
