use std::time::Duration;

use log::info;

use crate::model::{AchievementId, AchievementState, Statistics};

const SPEED_DEMON_LIMIT: Duration = Duration::from_secs(30);

/// Re-evaluates the whole roster against cumulative statistics after a
/// completed game. Unlocks are monotonic — nothing here ever clears an
/// `unlocked` flag — and every threshold crossed in this pass lands in
/// the returned batch, in roster order, for a single notification burst.
pub fn evaluate(stats: &mut Statistics, elapsed: Duration) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    let games_played = stats.games_played;
    let current_streak = stats.current_streak;
    let total_score = stats.total_score;
    let modes_played = stats
        .mode_stats
        .values()
        .filter(|mode| mode.games > 0)
        .count() as u32;

    for id in AchievementId::all() {
        let crossed = match id {
            // one-shots: progress latches together with the unlock
            AchievementId::FirstGame => games_played >= 1 && latch(stats, id),
            AchievementId::SpeedDemon => elapsed < SPEED_DEMON_LIMIT && latch(stats, id),
            // meters: progress tracks the source, the unlock latches
            AchievementId::Perfectionist => meter(stats, id, games_played),
            AchievementId::StreakMaster => meter(stats, id, current_streak),
            AchievementId::PuzzleMaster => meter(stats, id, modes_played),
            AchievementId::HighScorer => meter(stats, id, total_score),
        };
        if crossed {
            info!(target: "achievements", "Unlocked {}", id.id());
            newly_unlocked.push(id);
        }
    }
    newly_unlocked
}

fn entry<'a>(stats: &'a mut Statistics, id: AchievementId) -> &'a mut AchievementState {
    stats
        .achievements
        .entry(id)
        .or_insert_with(|| AchievementState::locked(id.max_progress()))
}

/// Marks a one-shot achievement done. Returns true on the first call.
fn latch(stats: &mut Statistics, id: AchievementId) -> bool {
    let state = entry(stats, id);
    if state.unlocked {
        return false;
    }
    state.progress = state.max;
    state.unlocked = true;
    true
}

/// Updates a metered achievement's progress (the streak meter may move
/// backwards; the unlock never does). Returns true when the meter first
/// reaches its maximum.
fn meter(stats: &mut Statistics, id: AchievementId, value: u32) -> bool {
    let state = entry(stats, id);
    state.progress = value.min(state.max);
    if state.progress >= state.max && !state.unlocked {
        state.unlocked = true;
        return true;
    }
    false
}
