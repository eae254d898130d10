use crate::game::settings::Settings;
use crate::model::{AchievementId, Difficulty, GameSummary, Mode, TimerState};

/// Audio cue the shell may synthesize. Emission is already gated on the
/// sound setting; the shell just plays what arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Move,
    Success,
    Error,
    Victory,
    LevelUp,
    Achievement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// State-change notifications for the presentation layer.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    SessionStarted {
        mode: Mode,
        difficulty: Difficulty,
    },
    ScoreChanged(u32),
    MovesChanged(u32),
    /// Completion share of the active board, 0-100.
    ProgressChanged(f64),
    /// Formatted `mm:ss` play time, refreshed on each tick.
    ClockUpdated(String),
    TimerStateChanged(TimerState),
    Sound(SoundCue),
    HintShown(String),
    GameWon(GameSummary),
    LevelUp {
        mode: Mode,
        level: u32,
    },
    AchievementsUnlocked(Vec<AchievementId>),
    SettingsChanged(Settings),
    DataExported(String),
    Notification {
        message: String,
        kind: NotificationKind,
    },
}
