use rand::RngCore;

use crate::model::{
    Difficulty, FlipOutcome, JigsawBoard, MemoryBoard, Mode, PlaceOutcome, SlideOutcome,
    SlidingBoard, ToggleOutcome, WordSearchBoard,
};

/// One discrete input routed to the active board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PuzzleInput {
    MoveTile(usize),
    PlacePiece { piece: usize, x: f64, y: f64 },
    FlipCard(usize),
    ToggleCell { row: usize, col: usize },
}

/// An action that earns score and a win check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualifyingAction {
    TileMoved,
    PiecePlaced,
    PairMatched,
    WordFound(String),
}

/// What a routed input did to the board. Invalid input is an outcome,
/// never an error: the board stays untouched and the caller may play a
/// failure cue.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// Swallowed without effect (gated, redundant, or out of range).
    Ignored,
    /// Validated and refused; the board did not change.
    Rejected,
    /// The board changed but nothing scores yet.
    Changed,
    /// A scoring action completed.
    Qualifying(QualifyingAction),
    /// Memory only: second card up, resolution window open. Counts as a
    /// move; the score waits for the resolution verdict.
    PairFlipped,
    /// Word search only: the ≥3-cell selection matched nothing; a
    /// deferred clear should be scheduled.
    SelectionMissed,
}

/// Capability surface every mode provides to the controller.
pub trait PuzzleState {
    fn attempt_input(&mut self, input: PuzzleInput) -> InputOutcome;
    fn check_win(&self) -> bool;
    fn progress_percent(&self) -> f64;
    fn shuffle(&mut self, rng: &mut dyn RngCore);
}

impl PuzzleState for SlidingBoard {
    fn attempt_input(&mut self, input: PuzzleInput) -> InputOutcome {
        match input {
            PuzzleInput::MoveTile(index) => match self.attempt_move(index) {
                SlideOutcome::Moved => InputOutcome::Qualifying(QualifyingAction::TileMoved),
                SlideOutcome::Rejected => InputOutcome::Rejected,
            },
            _ => InputOutcome::Ignored,
        }
    }

    fn check_win(&self) -> bool {
        self.is_won()
    }

    fn progress_percent(&self) -> f64 {
        self.progress_percent()
    }

    fn shuffle(&mut self, rng: &mut dyn RngCore) {
        SlidingBoard::shuffle(self, rng);
    }
}

impl PuzzleState for JigsawBoard {
    fn attempt_input(&mut self, input: PuzzleInput) -> InputOutcome {
        match input {
            PuzzleInput::PlacePiece { piece, x, y } => match self.attempt_place(piece, x, y) {
                PlaceOutcome::Placed => InputOutcome::Qualifying(QualifyingAction::PiecePlaced),
                PlaceOutcome::Moved | PlaceOutcome::AlreadyPlaced => InputOutcome::Changed,
                PlaceOutcome::Ignored => InputOutcome::Ignored,
            },
            _ => InputOutcome::Ignored,
        }
    }

    fn check_win(&self) -> bool {
        self.is_won()
    }

    fn progress_percent(&self) -> f64 {
        self.progress_percent()
    }

    fn shuffle(&mut self, rng: &mut dyn RngCore) {
        JigsawBoard::shuffle(self, rng);
    }
}

impl PuzzleState for MemoryBoard {
    fn attempt_input(&mut self, input: PuzzleInput) -> InputOutcome {
        match input {
            PuzzleInput::FlipCard(card) => match self.flip(card) {
                FlipOutcome::Flipped => InputOutcome::Changed,
                FlipOutcome::PairFlipped => InputOutcome::PairFlipped,
                FlipOutcome::Ignored => InputOutcome::Ignored,
            },
            _ => InputOutcome::Ignored,
        }
    }

    fn check_win(&self) -> bool {
        self.is_won()
    }

    fn progress_percent(&self) -> f64 {
        self.progress_percent()
    }

    fn shuffle(&mut self, rng: &mut dyn RngCore) {
        MemoryBoard::shuffle(self, rng);
    }
}

impl PuzzleState for WordSearchBoard {
    fn attempt_input(&mut self, input: PuzzleInput) -> InputOutcome {
        match input {
            PuzzleInput::ToggleCell { row, col } => match self.toggle_cell(row, col) {
                ToggleOutcome::SelectionChanged => InputOutcome::Changed,
                ToggleOutcome::WordFound(word) => {
                    InputOutcome::Qualifying(QualifyingAction::WordFound(word))
                }
                ToggleOutcome::Missed => InputOutcome::SelectionMissed,
                ToggleOutcome::Ignored => InputOutcome::Ignored,
            },
            _ => InputOutcome::Ignored,
        }
    }

    fn check_win(&self) -> bool {
        self.is_won()
    }

    fn progress_percent(&self) -> f64 {
        self.progress_percent()
    }

    fn shuffle(&mut self, _rng: &mut dyn RngCore) {
        WordSearchBoard::shuffle(self);
    }
}

/// The active board, one variant per mode.
#[derive(Debug, Clone)]
pub enum PuzzleBoard {
    Sliding(SlidingBoard),
    Jigsaw(JigsawBoard),
    Memory(MemoryBoard),
    Word(WordSearchBoard),
}

impl PuzzleBoard {
    pub fn for_mode<R: RngCore>(mode: Mode, difficulty: Difficulty, rng: &mut R) -> Self {
        match mode {
            Mode::Sliding => PuzzleBoard::Sliding(SlidingBoard::new(difficulty.grid_size(), rng)),
            Mode::Jigsaw => PuzzleBoard::Jigsaw(JigsawBoard::new(difficulty.piece_count(), rng)),
            Mode::Memory => PuzzleBoard::Memory(MemoryBoard::new(difficulty.pair_count(), rng)),
            Mode::Word => PuzzleBoard::Word(WordSearchBoard::new(difficulty.grid_size(), rng)),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            PuzzleBoard::Sliding(_) => Mode::Sliding,
            PuzzleBoard::Jigsaw(_) => Mode::Jigsaw,
            PuzzleBoard::Memory(_) => Mode::Memory,
            PuzzleBoard::Word(_) => Mode::Word,
        }
    }

    fn state(&self) -> &dyn PuzzleState {
        match self {
            PuzzleBoard::Sliding(board) => board,
            PuzzleBoard::Jigsaw(board) => board,
            PuzzleBoard::Memory(board) => board,
            PuzzleBoard::Word(board) => board,
        }
    }

    fn state_mut(&mut self) -> &mut dyn PuzzleState {
        match self {
            PuzzleBoard::Sliding(board) => board,
            PuzzleBoard::Jigsaw(board) => board,
            PuzzleBoard::Memory(board) => board,
            PuzzleBoard::Word(board) => board,
        }
    }

    pub fn attempt_input(&mut self, input: PuzzleInput) -> InputOutcome {
        self.state_mut().attempt_input(input)
    }

    pub fn check_win(&self) -> bool {
        self.state().check_win()
    }

    pub fn progress_percent(&self) -> f64 {
        self.state().progress_percent()
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.state_mut().shuffle(rng);
    }

    pub fn memory_mut(&mut self) -> Option<&mut MemoryBoard> {
        match self {
            PuzzleBoard::Memory(board) => Some(board),
            _ => None,
        }
    }

    pub fn word_mut(&mut self) -> Option<&mut WordSearchBoard> {
        match self {
            PuzzleBoard::Word(board) => Some(board),
            _ => None,
        }
    }
}
