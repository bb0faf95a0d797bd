//! Game state and core simulation types
//!
//! Everything one run owns lives in [`GameState`]. The tick function gets it
//! by `&mut` and nothing else writes to it during a tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::{difficulty, physics};
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Before the first start; nothing simulates
    Idle,
    /// Ticking
    Running,
    /// Collision happened; frozen until restart
    Ended,
}

/// The player sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Top edge, grows downward
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vel_y: f32,
    pub airborne: bool,
}

impl Player {
    /// Player standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_x,
            y: tuning.ground_y,
            width: tuning.player_width,
            height: tuning.player_height,
            vel_y: 0.0,
            airborne: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

/// Obstacle variants, each with its own geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Cactus standing on the ground line
    Ground { width: f32, height: f32 },
    /// Bird flying just above a grounded player's head
    Aerial { width: f32, height: f32 },
}

impl ObstacleKind {
    pub fn ground(tuning: &Tuning) -> Self {
        let (width, height) = tuning.ground_hazard_size;
        ObstacleKind::Ground { width, height }
    }

    pub fn aerial(tuning: &Tuning) -> Self {
        let (width, height) = tuning.aerial_hazard_size;
        ObstacleKind::Aerial { width, height }
    }

    pub fn size(&self) -> (f32, f32) {
        match *self {
            ObstacleKind::Ground { width, height } | ObstacleKind::Aerial { width, height } => {
                (width, height)
            }
        }
    }

    /// Top edge for a freshly spawned obstacle of this kind
    pub fn spawn_y(&self, tuning: &Tuning) -> f32 {
        match *self {
            ObstacleKind::Ground { height, .. } => tuning.ground_line() - height,
            ObstacleKind::Aerial { .. } => tuning.ground_y - tuning.aerial_hazard_lift,
        }
    }
}

/// A hazard scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
}

impl Obstacle {
    /// Spawn at the right edge of the field
    pub fn spawn(id: u32, kind: ObstacleKind, tuning: &Tuning) -> Self {
        Self {
            id,
            kind,
            x: tuning.field_width,
            y: kind.spawn_y(tuning),
        }
    }

    pub fn width(&self) -> f32 {
        self.kind.size().0
    }

    pub fn height(&self) -> f32 {
        self.kind.size().1
    }

    pub fn bounds(&self) -> Aabb {
        let (w, h) = self.kind.size();
        Aabb::new(self.x, self.y, w, h)
    }

    /// Fully past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width() <= 0.0
    }
}

/// Final numbers of a run, published to the UI when it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub ticks: u64,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Variant selection RNG
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks survived
    pub score: u64,
    pub level: u32,
    /// Scroll speed in pixels per tick
    pub speed: f32,
    pub last_spawn_tick: u64,
    /// Set once when the run ends
    pub summary: Option<RunSummary>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        let speed = difficulty::speed_for_level(1, &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: RunPhase::Idle,
            player,
            obstacles: Vec::new(),
            time_ticks: 0,
            score: 0,
            level: 1,
            speed,
            last_spawn_tick: 0,
            summary: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Idle -> Running. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != RunPhase::Idle {
            log::warn!("Ignoring start while {:?}", self.phase);
            return false;
        }
        self.phase = RunPhase::Running;
        log::info!("Run started (seed {})", self.seed);
        true
    }

    /// Ended -> Running with a fresh run. Returns false from any other phase.
    pub fn restart(&mut self, seed: u64) -> bool {
        if self.phase != RunPhase::Ended {
            log::warn!("Ignoring restart while {:?}", self.phase);
            return false;
        }
        let tuning = self.tuning.clone();
        *self = GameState::new(seed, tuning);
        self.phase = RunPhase::Running;
        log::info!("Run restarted (seed {})", seed);
        true
    }

    /// Running -> Ended, freezing the score
    pub(crate) fn end(&mut self) {
        let summary = RunSummary {
            score: self.score,
            level: self.level,
            ticks: self.time_ticks,
        };
        self.phase = RunPhase::Ended;
        self.summary = Some(summary);
        log::info!(
            "Run ended: score {} level {} after {} ticks",
            summary.score,
            summary.level,
            summary.ticks
        );
    }

    /// Jump trigger from keyboard or pointer; safe to call between ticks
    pub fn jump(&mut self) -> bool {
        physics::jump(&mut self.player, self.phase, &self.tuning)
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_grounded() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.player.y, 250.0);
        assert!(!state.player.airborne);
        assert_eq!(state.level, 1);
        assert_eq!(state.speed, 5.0);
        assert!(state.obstacles.is_empty());
        assert!(state.summary.is_none());
    }

    #[test]
    fn test_obstacle_geometry_per_variant() {
        let tuning = Tuning::default();
        let cactus = Obstacle::spawn(1, ObstacleKind::ground(&tuning), &tuning);
        assert_eq!((cactus.x, cactus.y), (800.0, 260.0));
        assert_eq!((cactus.width(), cactus.height()), (20.0, 40.0));

        let bird = Obstacle::spawn(2, ObstacleKind::aerial(&tuning), &tuning);
        assert_eq!((bird.x, bird.y), (800.0, 230.0));
        assert_eq!((bird.width(), bird.height()), (30.0, 20.0));
    }

    #[test]
    fn test_transitions_are_guarded() {
        let mut state = GameState::new(7, Tuning::default());
        assert!(!state.restart(8), "restart from Idle must be rejected");
        assert!(state.start());
        assert!(!state.start(), "start while Running must be rejected");
        assert!(!state.restart(8), "restart while Running must be rejected");
        state.end();
        assert!(!state.start(), "start from Ended must be rejected");
        assert!(state.restart(8));
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.seed, 8);
    }

    #[test]
    fn test_offscreen_boundary() {
        let tuning = Tuning::default();
        let mut cactus = Obstacle::spawn(1, ObstacleKind::ground(&tuning), &tuning);
        cactus.x = -19.5;
        assert!(!cactus.is_offscreen());
        cactus.x = -20.0;
        assert!(cactus.is_offscreen());
    }
}
