use serde::{Deserialize, Serialize};

/// The four puzzle modes the game ships with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sliding,
    Jigsaw,
    Memory,
    Word,
}

impl Mode {
    pub fn all() -> Vec<Mode> {
        vec![Mode::Sliding, Mode::Jigsaw, Mode::Memory, Mode::Word]
    }

    /// Stable identifier used as a persistence key.
    pub fn id(&self) -> &'static str {
        match self {
            Mode::Sliding => "sliding",
            Mode::Jigsaw => "jigsaw",
            Mode::Memory => "memory",
            Mode::Word => "word",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Sliding => "Sliding Puzzle",
            Mode::Jigsaw => "Jigsaw Puzzle",
            Mode::Memory => "Memory Match",
            Mode::Word => "Word Search",
        }
    }
}
