use std::time::Duration;

use uuid::Uuid;

use crate::model::{Difficulty, Mode, TimerState};

/// One active playthrough of a single mode and difficulty. Created on
/// game start and discarded on menu return or new game; only the
/// statistics aggregate outlives it.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub score: u32,
    pub moves: u32,
    pub timer: TimerState,
    pub is_active: bool,
    pub seed: u64,
    pub playthrough_id: Uuid,
}

impl GameSession {
    pub fn new(mode: Mode, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            mode,
            difficulty,
            score: 0,
            moves: 0,
            timer: TimerState::default(),
            is_active: true,
            seed,
            playthrough_id: Uuid::new_v4(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }
}
