//! Local high score board
//!
//! Persisted to LocalStorage, tracks top 10 scores. Stands in for the shared
//! board when no remote store is configured.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::leaderboard::{PlayerName, RecordId, ScoreRecord};

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalScores {
    pub entries: Vec<ScoreRecord>,
    /// Next record id
    #[serde(default)]
    next_id: u64,
}

impl LocalScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_runner_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &PlayerName, score: u64, level: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreRecord {
            id: RecordId::Number(self.next_id.max(1)),
            player_name: name.as_str().to_string(),
            score,
            level,
        };
        self.next_id = self.next_id.max(1) + 1;

        // Ties keep the earlier entry ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Best-first copy of the board
    pub fn top(&self) -> Vec<ScoreRecord> {
        self.entries.clone()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<LocalScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} local high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding unreadable local high scores: {}", e),
                }
            }
        }

        log::info!("No local high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> bool {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, high scores not saved");
            return false;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                let ok = storage.set_item(Self::STORAGE_KEY, &json).is_ok();
                if ok {
                    log::info!("High scores saved ({} entries)", self.entries.len());
                }
                ok
            }
            Err(e) => {
                log::warn!("Could not encode high scores: {}", e);
                false
            }
        }
    }

    /// Load from the native stand-in store
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        NATIVE_STORE.with(|slot| slot.borrow().clone()).unwrap_or_else(Self::new)
    }

    /// Native builds keep the board for the life of the thread
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> bool {
        NATIVE_STORE.with(|slot| *slot.borrow_mut() = Some(self.clone()));
        log::debug!("High scores kept in memory ({} entries)", self.entries.len());
        true
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static NATIVE_STORE: std::cell::RefCell<Option<LocalScores>> = const { std::cell::RefCell::new(None) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s).unwrap()
    }

    #[test]
    fn test_ranks_descending() {
        let mut board = LocalScores::new();
        assert_eq!(board.add_score(&name("ann"), 300, 1), Some(1));
        assert_eq!(board.add_score(&name("bob"), 900, 2), Some(1));
        assert_eq!(board.add_score(&name("cy"), 500, 2), Some(2));
        let scores: Vec<u64> = board.top().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 500, 300]);
        assert_eq!(board.top_score(), Some(900));
    }

    #[test]
    fn test_keeps_only_top_ten() {
        let mut board = LocalScores::new();
        for i in 0..15u64 {
            board.add_score(&name("p"), i * 10, 1);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(50));
        assert!(!board.qualifies(50));
        assert!(board.qualifies(51));
        assert_eq!(board.add_score(&name("low"), 10, 1), None);
    }

    #[test]
    fn test_zero_score_is_recorded() {
        let mut board = LocalScores::new();
        assert_eq!(board.add_score(&name("zero"), 0, 1), Some(1));
        assert_eq!(board.top_score(), Some(0));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut board = LocalScores::new();
        board.add_score(&name("a"), 1, 1);
        board.add_score(&name("b"), 2, 1);
        assert_ne!(board.entries[0].id, board.entries[1].id);
    }

    #[test]
    fn test_saved_board_loads_back() {
        let mut board = LocalScores::load();
        board.add_score(&name("ann"), 42, 1);
        assert!(board.save());

        let loaded = LocalScores::load();
        assert_eq!(loaded.entries, board.entries);
        assert!(loaded.top_score() >= Some(42));
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut board = LocalScores::new();
        board.add_score(&name("ann"), 42, 1);
        let json = serde_json::to_string(&board).unwrap();
        let back: LocalScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries, board.entries);
    }
}
