//! One simulation step per animation frame
//!
//! Order within a tick: physics, tick counter, spawn, scroll/collide/prune,
//! score, difficulty. A collision ends the run before the score moves.

use rand::Rng;

use super::collision::check_collision;
use super::state::{GameState, RunSummary};
use super::{difficulty, physics, spawn};

/// What a tick did, so the frame driver knows whether to keep scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing was simulated
    Skipped,
    /// Run still live
    Continued,
    /// Collision this tick; run frozen with this summary
    Ended(RunSummary),
}

impl TickOutcome {
    /// Whether another frame should be requested
    pub fn keep_running(&self) -> bool {
        matches!(self, TickOutcome::Continued)
    }
}

/// Advance the game state by one tick using the run's own RNG
pub fn tick(state: &mut GameState) -> TickOutcome {
    let mut rng = state.rng.clone();
    let outcome = tick_with_rng(state, &mut rng);
    state.rng = rng;
    outcome
}

/// Advance the game state by one tick, drawing variants from `rng`
pub fn tick_with_rng<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Skipped;
    }

    physics::integrate(&mut state.player, &state.tuning);

    state.time_ticks += 1;

    spawn::maybe_spawn(state, rng);

    // Scroll every obstacle, then drop the ones that hit or left the field
    let player_box = state.player.bounds();
    let speed = state.speed;
    let mut hit = None;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.x -= speed;
        if check_collision(&player_box, &obstacle.bounds()) {
            hit.get_or_insert(obstacle.id);
            return false;
        }
        !obstacle.is_offscreen()
    });

    if let Some(id) = hit {
        log::debug!("Collision with obstacle #{} at tick {}", id, state.time_ticks);
        state.end();
        return match state.summary {
            Some(summary) => TickOutcome::Ended(summary),
            None => TickOutcome::Skipped,
        };
    }

    state.score += 1;

    let level = difficulty::level_for_score(state.score, &state.tuning);
    if level != state.level {
        log::info!("Level {} reached at score {}", level, state.score);
    }
    state.level = level;
    state.speed = difficulty::speed_for_level(level, &state.tuning);

    TickOutcome::Continued
}
