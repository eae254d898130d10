mod achievement;
mod difficulty;
mod engine_command;
mod engine_event;
mod jigsaw;
mod memory;
mod mode;
mod progression;
mod puzzle;
mod session;
mod sliding;
mod stats;
mod timer_state;
mod word_search;

pub use achievement::{AchievementId, AchievementState};
pub use difficulty::Difficulty;
pub use engine_command::{EngineCommand, SettingsChange};
pub use engine_event::{EngineEvent, NotificationKind, SoundCue};
pub use jigsaw::{JigsawBoard, JigsawPiece, PlaceOutcome, BOARD_HEIGHT, BOARD_WIDTH};
pub use memory::{FlipOutcome, MemoryBoard, MemoryCard, PairResolution, SYMBOL_POOL};
pub use mode::Mode;
pub use progression::{LevelUp, ModeProgress};
pub use puzzle::{InputOutcome, PuzzleBoard, PuzzleInput, PuzzleState, QualifyingAction};
pub use session::GameSession;
pub use sliding::{SlideOutcome, SlidingBoard};
pub use stats::{GameSummary, LeaderboardEntry, ModeStats, RecentGame, Statistics};
pub use timer_state::TimerState;
pub use word_search::{LetterCell, ToggleOutcome, WordSearchBoard, WORD_POOL};
