use std::time::Instant;

use crate::game::settings::{AnimationSpeed, Theme};
use crate::model::{Difficulty, Mode};

/// Partial settings update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsChange {
    pub sound_enabled: Option<bool>,
    pub show_hints: Option<bool>,
    pub theme: Option<Theme>,
    pub animation_speed: Option<AnimationSpeed>,
}

/// Everything the presentation layer can ask the engine to do.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Start a session; `None` seed draws one from `SEED` or entropy.
    NewGame(Mode, Difficulty, Option<u64>),
    AttemptMove(usize),
    AttemptPlace { piece: usize, x: f64, y: f64 },
    Flip(usize),
    ToggleCell { row: usize, col: usize },
    Shuffle,
    ShowHint,
    Pause,
    Resume,
    /// Clock pulse from the shell: fires due deferred tasks and refreshes
    /// the on-screen timer.
    Tick(Instant),
    BackToMenu,
    ExportData,
    ImportData(String),
    ResetData,
    ChangeSettings(SettingsChange),
}
