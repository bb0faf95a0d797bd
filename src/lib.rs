//! Dino Runner - a side-scrolling jump-over-obstacles arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, difficulty)
//! - `renderer`: WebGPU rendering pipeline
//! - `leaderboard`: Shared score board (remote store or LocalStorage fallback)
//! - `tuning`: Data-driven game balance
//! - `hud`: Text and class values for the DOM overlay

pub mod error;
pub mod highscores;
pub mod hud;
pub mod leaderboard;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use highscores::LocalScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (canvas pixels, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 300.0;

    /// Resting y of the player's top edge
    pub const GROUND_Y: f32 = FIELD_HEIGHT - 50.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Downward acceleration, pixels/tick²
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -15.0;

    /// Scroll speed at level 1, pixels/tick
    pub const BASE_SPEED: f32 = 5.0;
    /// Extra scroll speed per level above 1
    pub const SPEED_PER_LEVEL: f32 = 0.5;
    /// Score needed per level
    pub const SCORE_PER_LEVEL: u64 = 500;

    /// Spawn gap: max(SPAWN_GAP_FLOOR, SPAWN_GAP_BASE - level * SPAWN_GAP_STEP)
    pub const SPAWN_GAP_BASE: u64 = 120;
    pub const SPAWN_GAP_STEP: u64 = 5;
    pub const SPAWN_GAP_FLOOR: u64 = 80;

    /// Probability that a spawned obstacle is an aerial hazard
    pub const AERIAL_CHANCE: f32 = 0.3;

    /// Ground hazard (cactus) size
    pub const GROUND_HAZARD_WIDTH: f32 = 20.0;
    pub const GROUND_HAZARD_HEIGHT: f32 = 40.0;
    /// Aerial hazard (bird) size
    pub const AERIAL_HAZARD_WIDTH: f32 = 30.0;
    pub const AERIAL_HAZARD_HEIGHT: f32 = 20.0;
    /// How far above the player's resting top edge birds fly
    pub const AERIAL_HAZARD_LIFT: f32 = 20.0;

    /// Leaderboard size
    pub const MAX_HIGH_SCORES: usize = 10;
    /// Longest accepted player name, in characters
    pub const MAX_NAME_CHARS: usize = 20;
}
