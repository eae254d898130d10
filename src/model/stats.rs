use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use uuid::Uuid;

use crate::model::{AchievementId, AchievementState, Difficulty, Mode, ModeProgress};

/// Snapshot of a completed game handed to the statistics pipeline.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub score: u32,
    pub moves: u32,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
    pub finished_at: DateTime<Utc>,
    pub playthrough_id: Uuid,
}

/// Dashboard line for one finished game, newest kept first.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecentGame {
    pub mode: Mode,
    pub score: u32,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub time: Duration,
    pub date: DateTime<Utc>,
}

impl RecentGame {
    pub fn from_summary(summary: &GameSummary) -> Self {
        Self {
            mode: summary.mode,
            score: summary.score,
            time: summary.elapsed,
            date: summary.finished_at,
        }
    }
}

/// Cumulative per-mode figures.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeStats {
    pub games: u32,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub best_time: Option<Duration>,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub average_time: Option<Duration>,
    pub total_score: u32,
}

/// Local leaderboard stub: a single entry for the current player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player: &'static str,
    pub score: u32,
    pub best_time: Option<Duration>,
}

/// The one aggregate that survives across sessions. Mutated only by the
/// statistics pipeline at game completion and replaced wholesale by
/// import/reset.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub games_played: u32,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub best_time: Option<Duration>,
    pub total_score: u32,
    pub wins: u32,
    pub recent_games: Vec<RecentGame>,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub average_time: Option<Duration>,
    pub mode_stats: HashMap<Mode, ModeStats>,
    pub achievements: HashMap<AchievementId, AchievementState>,
    pub progress: HashMap<Mode, ModeProgress>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            games_played: 0,
            best_time: None,
            total_score: 0,
            wins: 0,
            recent_games: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            average_time: None,
            mode_stats: Mode::all()
                .into_iter()
                .map(|mode| (mode, ModeStats::default()))
                .collect(),
            achievements: AchievementId::all()
                .into_iter()
                .map(|id| (id, AchievementState::locked(id.max_progress())))
                .collect(),
            progress: Mode::all()
                .into_iter()
                .map(|mode| (mode, ModeProgress::default()))
                .collect(),
        }
    }
}

impl Statistics {
    /// Whole-percent win rate, 0 when nothing was played.
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        (self.wins as f64 / self.games_played as f64 * 100.0).round() as u32
    }

    /// The mode with the most completed games, if any were played.
    pub fn favorite_mode(&self) -> Option<Mode> {
        Mode::all()
            .into_iter()
            .filter_map(|mode| {
                let games = self.mode_stats.get(&mode)?.games;
                (games > 0).then_some((mode, games))
            })
            .max_by_key(|&(_, games)| games)
            .map(|(mode, _)| mode)
    }

    /// Mean XP-bar fill across all four modes, 0-100.
    pub fn overall_progress(&self) -> f64 {
        let modes = Mode::all();
        let total: f64 = modes
            .iter()
            .map(|mode| {
                self.progress
                    .get(mode)
                    .map(ModeProgress::percent)
                    .unwrap_or(0.0)
            })
            .sum();
        total / modes.len() as f64
    }

    pub fn leaderboard_entry(&self) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: 1,
            player: "You",
            score: self.total_score,
            best_time: self.best_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_every_mode_and_achievement() {
        let stats = Statistics::default();
        assert_eq!(stats.mode_stats.len(), 4);
        assert_eq!(stats.progress.len(), 4);
        assert_eq!(stats.achievements.len(), 6);
        for id in AchievementId::all() {
            let state = &stats.achievements[&id];
            assert!(!state.unlocked);
            assert_eq!(state.max, id.max_progress());
        }
    }

    #[test]
    fn test_json_schema_keys_are_stable() {
        let stats = Statistics::default();
        let value = serde_json::to_value(&stats).unwrap();
        assert!(value.get("gamesPlayed").is_some());
        assert!(value.get("modeStats").unwrap().get("sliding").is_some());
        assert!(value
            .get("achievements")
            .unwrap()
            .get("first-game")
            .is_some());
        assert!(value.get("progress").unwrap().get("word").is_some());
    }

    #[test]
    fn test_durations_round_trip_as_milliseconds() {
        let mut stats = Statistics::default();
        stats.best_time = Some(Duration::from_millis(30_500));
        let json = serde_json::to_string(&stats).unwrap();
        let back: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.best_time, Some(Duration::from_millis(30_500)));
    }

    #[test]
    fn test_missing_fields_fill_from_defaults() {
        let back: Statistics = serde_json::from_str(r#"{"gamesPlayed": 3}"#).unwrap();
        assert_eq!(back.games_played, 3);
        assert_eq!(back.wins, 0);
        // absent maps fall back to the fully seeded defaults
        assert_eq!(back.mode_stats.len(), 4);
        assert_eq!(back.achievements.len(), 6);
    }

    #[test]
    fn test_win_rate_rounds_to_whole_percent() {
        let mut stats = Statistics::default();
        assert_eq!(stats.win_rate(), 0);
        stats.games_played = 3;
        stats.wins = 2;
        assert_eq!(stats.win_rate(), 67);
    }

    #[test]
    fn test_favorite_mode_requires_played_games() {
        let mut stats = Statistics::default();
        assert_eq!(stats.favorite_mode(), None);
        stats.mode_stats.get_mut(&Mode::Memory).unwrap().games = 2;
        stats.mode_stats.get_mut(&Mode::Word).unwrap().games = 5;
        assert_eq!(stats.favorite_mode(), Some(Mode::Word));
    }
}
