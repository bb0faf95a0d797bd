//! Shared leaderboard
//!
//! The game only needs two calls from here: fetch the top scores and save a
//! finished run. Both soft-fail: errors are logged and the caller gets an
//! empty list or `false`, never a retry.

pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HIGH_SCORES, MAX_NAME_CHARS};
use crate::error::GameError;
use crate::highscores::LocalScores;
pub use store::{RemoteStore, StoreConfig};

/// Opaque id assigned by whichever store inserted the record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A saved score as the board returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: RecordId,
    pub player_name: String,
    pub score: u64,
    pub level: u32,
}

/// Insert payload; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScore {
    pub player_name: String,
    pub score: u64,
    pub level: u32,
}

/// Trimmed, non-empty name of at most 20 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(raw: &str) -> Result<Self, GameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GameError::InvalidName("name is empty".into()));
        }
        let chars = trimmed.chars().count();
        if chars > MAX_NAME_CHARS {
            return Err(GameError::InvalidName(format!(
                "{} characters, at most {} allowed",
                chars, MAX_NAME_CHARS
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Order best-first and cut to the board size
pub fn rank(mut records: Vec<ScoreRecord>) -> Vec<ScoreRecord> {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(MAX_HIGH_SCORES);
    records
}

/// Collapse a store failure into the soft-fail value
pub fn soft_fail<T: Default>(result: Result<T, GameError>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("{} failed: {}", what, e);
        T::default()
    })
}

/// Where scores go: the shared remote table or this browser's LocalStorage
#[derive(Debug, Clone)]
pub enum ScoreService {
    Remote(RemoteStore),
    Local,
}

impl ScoreService {
    /// Remote if the build carries store credentials, local otherwise
    pub fn from_env() -> Self {
        match StoreConfig::from_env() {
            Some(config) => {
                log::info!("Leaderboard: remote store at {}", config.url);
                ScoreService::Remote(RemoteStore::new(config))
            }
            None => {
                log::info!("Leaderboard: no remote store configured, using LocalStorage");
                ScoreService::Local
            }
        }
    }

    /// Top scores, best first, or an error the caller may choose to ignore
    pub async fn try_fetch_top_scores(&self) -> Result<Vec<ScoreRecord>, GameError> {
        match self {
            ScoreService::Remote(store) => store.fetch_top_scores().await.map(rank),
            ScoreService::Local => Ok(LocalScores::load().top()),
        }
    }

    /// Top scores, best first; empty on any failure
    pub async fn fetch_top_scores(&self) -> Vec<ScoreRecord> {
        soft_fail(self.try_fetch_top_scores().await, "Fetching top scores")
    }

    /// Persist one finished run
    pub async fn try_save_score(
        &self,
        name: &PlayerName,
        score: u64,
        level: u32,
    ) -> Result<(), GameError> {
        match self {
            ScoreService::Remote(store) => {
                let record = NewScore {
                    player_name: name.as_str().to_string(),
                    score,
                    level: level.max(1),
                };
                store.insert(&record).await
            }
            ScoreService::Local => {
                let mut board = LocalScores::load();
                let best = board.top_score();
                match board.add_score(name, score, level.max(1)) {
                    None => log::info!("Score {} did not make the local top {}", score, MAX_HIGH_SCORES),
                    Some(_) if best.is_none_or(|b| score > b) => log::info!("New local best: {}", score),
                    Some(rank) => log::info!("Score {} ranked #{} locally", score, rank),
                }
                if board.save() {
                    Ok(())
                } else {
                    Err(GameError::Store("LocalStorage write failed".into()))
                }
            }
        }
    }

    /// Persist one finished run; `false` on any failure
    pub async fn save_score(&self, name: &PlayerName, score: u64, level: u32) -> bool {
        match self.try_save_score(name, score, level).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Saving score failed: {}", e);
                false
            }
        }
    }
}

/// Presentation-side board state: what is shown and whether this run saved
#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    pub entries: Vec<ScoreRecord>,
    pub loading: bool,
    pub visible: bool,
    saving: bool,
    saved: bool,
}

impl LeaderboardView {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// A failed fetch keeps whatever was shown before
    pub fn finish_load(&mut self, result: Result<Vec<ScoreRecord>, GameError>) {
        match result {
            Ok(entries) => self.entries = entries,
            Err(e) => log::warn!("Leaderboard refresh failed, keeping previous entries: {}", e),
        }
        self.loading = false;
    }

    /// One save per run, none while one is in flight
    pub fn can_save(&self) -> bool {
        !self.saved && !self.saving
    }

    /// Claim the save slot; false if a save is running or already done
    pub fn begin_save(&mut self) -> bool {
        if !self.can_save() {
            return false;
        }
        self.saving = true;
        true
    }

    /// The board is revealed after any attempt; only success closes the slot
    pub fn finish_save(&mut self, ok: bool) {
        self.saving = false;
        self.saved = ok;
        self.visible = true;
    }

    pub fn has_saved(&self) -> bool {
        self.saved
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// New run: the save slot reopens and the board hides
    pub fn reset_for_run(&mut self) {
        self.saving = false;
        self.saved = false;
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, score: u64) -> ScoreRecord {
        ScoreRecord {
            id: RecordId::Number(id),
            player_name: format!("p{}", id),
            score,
            level: 1,
        }
    }

    #[test]
    fn test_player_name_trims_and_bounds() {
        assert_eq!(PlayerName::new("  rex ").unwrap().as_str(), "rex");
        assert!(matches!(PlayerName::new("   "), Err(GameError::InvalidName(_))));
        assert!(PlayerName::new(&"a".repeat(20)).is_ok());
        assert!(PlayerName::new(&"a".repeat(21)).is_err());
        // Counted in characters, not bytes
        assert!(PlayerName::new(&"ü".repeat(20)).is_ok());
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let records: Vec<ScoreRecord> = (0..12).map(|i| record(i, i * 7 % 13)).collect();
        let ranked = rank(records);
        assert_eq!(ranked.len(), MAX_HIGH_SCORES);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_record_id_accepts_numbers_and_uuids() {
        let json = r#"[
            {"id": 7, "player_name": "a", "score": 10, "level": 1},
            {"id": "3f1c", "player_name": "b", "score": 5, "level": 1, "created_at": "2024-01-01"}
        ]"#;
        let records: Vec<ScoreRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].id, RecordId::Number(7));
        assert_eq!(records[1].id.to_string(), "3f1c");
    }

    #[test]
    fn test_soft_fail_defaults() {
        let empty: Vec<ScoreRecord> = soft_fail(Err(GameError::Store("down".into())), "fetch");
        assert!(empty.is_empty());
        assert_eq!(soft_fail(Ok(vec![1, 2]), "fetch"), vec![1, 2]);
    }

    fn remote() -> ScoreService {
        let config = StoreConfig::from_parts(Some("https://db.example.co"), Some("k3y")).unwrap();
        ScoreService::Remote(RemoteStore::new(config))
    }

    #[test]
    fn test_unreachable_remote_soft_fails() {
        let service = remote();
        let name = PlayerName::new("rex").unwrap();
        assert!(!pollster::block_on(service.save_score(&name, 500, 2)));
        assert!(pollster::block_on(service.fetch_top_scores()).is_empty());
        assert!(matches!(
            pollster::block_on(service.try_fetch_top_scores()),
            Err(GameError::Store(_))
        ));
    }

    #[test]
    fn test_local_service_saves_and_fetches() {
        let service = ScoreService::Local;
        let name = PlayerName::new("ann").unwrap();
        assert!(pollster::block_on(service.save_score(&name, 640, 0)));

        let top = pollster::block_on(service.fetch_top_scores());
        let saved = top.iter().find(|r| r.player_name == "ann" && r.score == 640);
        assert_eq!(saved.map(|r| r.level), Some(1), "level is at least 1");
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_failed_refresh_keeps_entries() {
        let mut view = LeaderboardView::new();
        assert!(view.loading);
        view.finish_load(Ok(vec![record(1, 100)]));
        assert!(!view.loading);

        view.begin_load();
        view.finish_load(Err(GameError::Store("timeout".into())));
        assert_eq!(view.entries, vec![record(1, 100)]);
        assert!(!view.loading);
    }

    #[test]
    fn test_save_guard() {
        let mut view = LeaderboardView::new();
        assert!(view.begin_save());
        assert!(!view.begin_save(), "second save while in flight");
        view.finish_save(false);
        assert!(view.visible);
        assert!(view.can_save(), "failed save leaves the slot open");

        assert!(view.begin_save());
        view.finish_save(true);
        assert!(view.has_saved());
        assert!(!view.begin_save(), "already saved this run");

        view.reset_for_run();
        assert!(view.can_save());
        assert!(!view.visible);
    }
}
