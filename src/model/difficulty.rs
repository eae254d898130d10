use serde::{Deserialize, Serialize};

use crate::model::Mode;

/// Difficulty selected for a session, carried as the raw knob value the
/// board constructors and the scoring formula both consume. Its meaning
/// depends on the mode: grid side for sliding and word search, piece
/// count for jigsaw, pair count for memory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Difficulty(u32);

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(4)
    }
}

impl Difficulty {
    pub fn new(value: u32) -> Difficulty {
        Difficulty(value.max(1))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Score weight relative to the default difficulty of 4.
    pub fn multiplier(&self) -> f64 {
        self.0 as f64 / 4.0
    }

    pub fn grid_size(&self) -> usize {
        self.0 as usize
    }

    pub fn piece_count(&self) -> usize {
        self.0 as usize
    }

    pub fn pair_count(&self) -> usize {
        self.0 as usize
    }

    /// Short header label, e.g. "4x4", "12 pieces", "8 pairs".
    pub fn label(&self, mode: Mode) -> String {
        match mode {
            Mode::Sliding | Mode::Word => format!("{}x{}", self.0, self.0),
            Mode::Jigsaw => format!("{} pieces", self.0),
            Mode::Memory => format!("{} pairs", self.0),
        }
    }
}
