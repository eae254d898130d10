use serde::{Deserialize, Serialize};

/// The fixed achievement roster. Ids double as persistence keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    #[serde(rename = "first-game")]
    FirstGame,
    #[serde(rename = "speed-demon")]
    SpeedDemon,
    #[serde(rename = "perfectionist")]
    Perfectionist,
    #[serde(rename = "streak-master")]
    StreakMaster,
    #[serde(rename = "puzzle-master")]
    PuzzleMaster,
    #[serde(rename = "high-scorer")]
    HighScorer,
}

impl AchievementId {
    /// Evaluation (and notification) order.
    pub fn all() -> Vec<AchievementId> {
        vec![
            AchievementId::FirstGame,
            AchievementId::SpeedDemon,
            AchievementId::Perfectionist,
            AchievementId::StreakMaster,
            AchievementId::PuzzleMaster,
            AchievementId::HighScorer,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            AchievementId::FirstGame => "first-game",
            AchievementId::SpeedDemon => "speed-demon",
            AchievementId::Perfectionist => "perfectionist",
            AchievementId::StreakMaster => "streak-master",
            AchievementId::PuzzleMaster => "puzzle-master",
            AchievementId::HighScorer => "high-scorer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::FirstGame => "First Steps",
            AchievementId::SpeedDemon => "Speed Demon",
            AchievementId::Perfectionist => "Perfectionist",
            AchievementId::StreakMaster => "Streak Master",
            AchievementId::PuzzleMaster => "Puzzle Master",
            AchievementId::HighScorer => "High Scorer",
        }
    }

    /// Progress value at which the achievement unlocks.
    pub fn max_progress(&self) -> u32 {
        match self {
            AchievementId::FirstGame => 1,
            AchievementId::SpeedDemon => 1,
            AchievementId::Perfectionist => 10,
            AchievementId::StreakMaster => 5,
            AchievementId::PuzzleMaster => 4,
            AchievementId::HighScorer => 10_000,
        }
    }
}

/// Unlock state plus a progress meter for the dashboard. `unlocked`
/// never resets once set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AchievementState {
    pub unlocked: bool,
    pub progress: u32,
    pub max: u32,
}

impl AchievementState {
    pub fn locked(max: u32) -> Self {
        Self {
            unlocked: false,
            progress: 0,
            max,
        }
    }
}
