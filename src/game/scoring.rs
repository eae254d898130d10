use std::time::Duration;

use crate::model::Difficulty;

pub const BASE_SCORE: u32 = 10;
// seconds during which finishing actions still earn a time bonus
pub const TIME_BONUS_WINDOW_SECS: u64 = 100;

/// Points earned by one qualifying action: the difficulty-weighted base
/// plus a time bonus that decays one point per elapsed second. Never
/// negative, so the session score is monotonic non-decreasing.
pub fn action_score(difficulty: Difficulty, elapsed: Duration) -> u32 {
    let time_bonus = TIME_BONUS_WINDOW_SECS.saturating_sub(elapsed.as_secs());
    (BASE_SCORE as f64 * difficulty.multiplier() + time_bonus as f64).floor() as u32
}
