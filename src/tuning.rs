//! Game balance knobs
//!
//! Defaults reproduce the classic feel exactly. An override can be dropped
//! into LocalStorage as JSON for playtesting; missing fields fall back to
//! the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Every constant the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Resting y of the player's top edge
    pub ground_y: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_per_level: f32,
    pub score_per_level: u64,

    // === Spawning ===
    pub spawn_gap_base: u64,
    pub spawn_gap_step: u64,
    pub spawn_gap_floor: u64,
    /// Probability (0-1) of an aerial hazard
    pub aerial_chance: f32,

    // === Obstacles ===
    pub ground_hazard_size: (f32, f32),
    pub aerial_hazard_size: (f32, f32),
    pub aerial_hazard_lift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_y: GROUND_Y,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            base_speed: BASE_SPEED,
            speed_per_level: SPEED_PER_LEVEL,
            score_per_level: SCORE_PER_LEVEL,

            spawn_gap_base: SPAWN_GAP_BASE,
            spawn_gap_step: SPAWN_GAP_STEP,
            spawn_gap_floor: SPAWN_GAP_FLOOR,
            aerial_chance: AERIAL_CHANCE,

            ground_hazard_size: (GROUND_HAZARD_WIDTH, GROUND_HAZARD_HEIGHT),
            aerial_hazard_size: (AERIAL_HAZARD_WIDTH, AERIAL_HAZARD_HEIGHT),
            aerial_hazard_lift: AERIAL_HAZARD_LIFT,
        }
    }
}

impl Tuning {
    /// y of the ground line the player stands on
    pub fn ground_line(&self) -> f32 {
        self.ground_y + self.player_height
    }

    /// Highest point above `ground_y` a jump can reach
    ///
    /// Sums the per-tick rise under semi-implicit Euler until the velocity
    /// stops pointing up.
    pub fn jump_apex(&self) -> f32 {
        let mut vel = self.jump_velocity;
        let mut rise = 0.0;
        loop {
            vel += self.gravity;
            if vel >= 0.0 {
                return rise;
            }
            rise -= vel;
        }
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), GameError> {
        if self.gravity <= 0.0 {
            return Err(GameError::InvalidTuning("gravity must be positive".into()));
        }
        if self.jump_velocity >= 0.0 {
            return Err(GameError::InvalidTuning(
                "jump_velocity must point up (negative)".into(),
            ));
        }
        if self.base_speed <= 0.0 || self.speed_per_level < 0.0 {
            return Err(GameError::InvalidTuning(
                "speeds must be positive and non-decreasing".into(),
            ));
        }
        if self.score_per_level == 0 {
            return Err(GameError::InvalidTuning("score_per_level must be > 0".into()));
        }
        if self.spawn_gap_floor == 0 {
            return Err(GameError::InvalidTuning("spawn_gap_floor must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.aerial_chance) {
            return Err(GameError::InvalidTuning(format!(
                "aerial_chance {} outside 0..=1",
                self.aerial_chance
            )));
        }
        Ok(())
    }

    /// Parse a JSON override, falling back per-field to defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_runner_tuning";

    /// Load tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.ground_y, 250.0);
        assert_eq!(tuning.ground_line(), 300.0);
    }

    #[test]
    fn test_jump_apex_matches_hand_sum() {
        // v: -14.2, -13.4, ... -0.6 over 18 ticks
        let apex = Tuning::default().jump_apex();
        assert!((apex - 133.2).abs() < 0.01, "apex was {}", apex);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"gravity": 1.0}"#).unwrap();
        assert_eq!(tuning.gravity, 1.0);
        assert_eq!(tuning.jump_velocity, JUMP_VELOCITY);
        assert_eq!(tuning.spawn_gap_floor, SPAWN_GAP_FLOOR);
    }

    #[test]
    fn test_rejects_bad_override() {
        assert!(matches!(
            Tuning::from_json(r#"{"aerial_chance": 1.5}"#),
            Err(GameError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{"jump_velocity": 3.0}"#),
            Err(GameError::InvalidTuning(_))
        ));
        assert!(matches!(Tuning::from_json("not json"), Err(GameError::Decode(_))));
    }
}
