//! Text and class values for the DOM overlay
//!
//! The browser shell only copies these into elements.

use crate::leaderboard::{LeaderboardView, ScoreRecord};

/// Class that hides an element
pub const HIDDEN_CLASS: &str = "hidden";

pub fn score_label(score: u64) -> String {
    format!("Score: {}", score)
}

pub fn level_label(level: u32) -> String {
    format!("Level: {}", level)
}

/// One leaderboard row; `index` is 0-based
pub fn board_line(index: usize, entry: &ScoreRecord) -> String {
    format!(
        "#{} {} {} Lvl {}",
        index + 1,
        entry.player_name,
        entry.score,
        entry.level
    )
}

/// Status line above the list, empty once there is something to show
pub fn board_status(board: &LeaderboardView) -> &'static str {
    if board.loading {
        "Loading..."
    } else if board.entries.is_empty() {
        "No scores yet. Be the first!"
    } else {
        ""
    }
}

pub fn toggle_label(visible: bool) -> &'static str {
    if visible { "Hide Leaderboard" } else { "Show Leaderboard" }
}

pub fn save_label(saved: bool) -> &'static str {
    if saved { "Saved!" } else { "Save Score" }
}

/// Add or remove a single class token, leaving the others in place
pub fn with_class(class_name: &str, token: &str, on: bool) -> String {
    let mut tokens: Vec<&str> = class_name
        .split_whitespace()
        .filter(|t| *t != token)
        .collect();
    if on {
        tokens.push(token);
    }
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::RecordId;

    #[test]
    fn test_unhiding_keeps_layout_classes() {
        assert_eq!(with_class("overlay", HIDDEN_CLASS, false), "overlay");
        assert_eq!(with_class("overlay", HIDDEN_CLASS, true), "overlay hidden");
        assert_eq!(with_class("overlay hidden", HIDDEN_CLASS, false), "overlay");
        assert_eq!(with_class("hidden", HIDDEN_CLASS, false), "");
        // Idempotent
        assert_eq!(with_class("overlay hidden", HIDDEN_CLASS, true), "overlay hidden");
    }

    #[test]
    fn test_board_status() {
        let mut board = LeaderboardView::new();
        assert_eq!(board_status(&board), "Loading...");
        board.finish_load(Ok(Vec::new()));
        assert_eq!(board_status(&board), "No scores yet. Be the first!");
        board.finish_load(Ok(vec![ScoreRecord {
            id: RecordId::Number(1),
            player_name: "rex".into(),
            score: 420,
            level: 1,
        }]));
        assert_eq!(board_status(&board), "");
        assert_eq!(board_line(0, &board.entries[0]), "#1 rex 420 Lvl 1");
    }

    #[test]
    fn test_labels() {
        assert_eq!(score_label(257), "Score: 257");
        assert_eq!(level_label(2), "Level: 2");
        assert_eq!(toggle_label(true), "Hide Leaderboard");
        assert_eq!(toggle_label(false), "Show Leaderboard");
        assert_eq!(save_label(false), "Save Score");
        assert_eq!(save_label(true), "Saved!");
    }
}
