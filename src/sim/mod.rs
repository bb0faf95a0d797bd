//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, fixed constants per tick
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check_collision};
pub use difficulty::{level_for_score, speed_for_level};
pub use spawn::spawn_gap;
pub use state::{GameState, Obstacle, ObstacleKind, Player, RunPhase, RunSummary};
pub use tick::{TickOutcome, tick, tick_with_rng};
