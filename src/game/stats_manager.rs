use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{error, trace};

use crate::game::achievements;
use crate::game::storage::{Storage, STATS_KEY};
use crate::model::{AchievementId, GameSummary, LevelUp, RecentGame, Statistics};

pub const MAX_RECENT_GAMES: usize = 10;

/// What a recorded game triggered, for the notification layer.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub level_up: Option<LevelUp>,
    pub unlocked: Vec<AchievementId>,
}

/// Owns the persistent statistics aggregate. Loads it once on startup
/// and folds one `GameSummary` in per completed game; every fold is
/// persisted through the injected storage.
pub struct StatsManager {
    storage: Rc<RefCell<dyn Storage>>,
    stats: Statistics,
}

impl StatsManager {
    pub fn new(storage: Rc<RefCell<dyn Storage>>) -> Self {
        let stats = storage
            .borrow()
            .load(STATS_KEY)
            .and_then(|blob| match serde_json::from_str(&blob) {
                Ok(stats) => Some(stats),
                Err(err) => {
                    error!(target: "stats", "Discarding unreadable statistics: {}", err);
                    None
                }
            })
            .unwrap_or_default();
        Self { storage, stats }
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Swaps in an imported aggregate and persists it.
    pub fn replace(&mut self, stats: Statistics) {
        self.stats = stats;
        self.save();
    }

    pub fn reset(&mut self) {
        self.stats = Statistics::default();
        self.save();
    }

    fn save(&self) {
        match serde_json::to_string_pretty(&self.stats) {
            Ok(blob) => {
                if let Err(err) = self.storage.borrow_mut().save(STATS_KEY, &blob) {
                    error!(target: "stats", "Failed to persist statistics: {}", err);
                }
            }
            Err(err) => error!(target: "stats", "Failed to encode statistics: {}", err),
        }
    }

    /// Folds one completed game into the aggregate: counters, win and
    /// streak bookkeeping, best and running-average times (global and
    /// per mode), the mode's XP track, the achievement roster, and the
    /// recent-games ring.
    pub fn record_game(&mut self, summary: &GameSummary) -> RecordOutcome {
        trace!(target: "stats", "Recording game: {:?}", summary);
        let stats = &mut self.stats;
        stats.games_played += 1;
        stats.total_score += summary.score;

        // a win is any completed game that scored; the streak follows it
        if summary.score > 0 {
            stats.wins += 1;
            stats.current_streak += 1;
            stats.longest_streak = stats.longest_streak.max(stats.current_streak);
        } else {
            stats.current_streak = 0;
        }

        if stats.best_time.map_or(true, |best| summary.elapsed < best) {
            stats.best_time = Some(summary.elapsed);
        }
        stats.average_time = Some(fold_average(
            stats.average_time,
            stats.games_played,
            summary.elapsed,
        ));

        let mode_stats = stats.mode_stats.entry(summary.mode).or_default();
        mode_stats.games += 1;
        mode_stats.total_score += summary.score;
        if mode_stats
            .best_time
            .map_or(true, |best| summary.elapsed < best)
        {
            mode_stats.best_time = Some(summary.elapsed);
        }
        mode_stats.average_time = Some(fold_average(
            mode_stats.average_time,
            mode_stats.games,
            summary.elapsed,
        ));

        let level_up = stats
            .progress
            .entry(summary.mode)
            .or_default()
            .apply_score(summary.score);

        let unlocked = achievements::evaluate(stats, summary.elapsed);

        stats.recent_games.insert(0, RecentGame::from_summary(summary));
        stats.recent_games.truncate(MAX_RECENT_GAMES);

        self.save();
        RecordOutcome { level_up, unlocked }
    }
}

/// Incremental mean over `n` samples: `(old·(n-1) + sample) / n`.
fn fold_average(old: Option<Duration>, n: u32, sample: Duration) -> Duration {
    match old {
        None => sample,
        Some(average) => (average * (n - 1) + sample) / n,
    }
}
