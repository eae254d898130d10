use itertools::iproduct;
use log::trace;
use rand::Rng;

/// Candidate words, tried in order until the board is full.
pub const WORD_POOL: [&str; 8] = [
    "PUZZLE",
    "GAME",
    "FUN",
    "BRAIN",
    "LOGIC",
    "SKILL",
    "CHALLENGE",
    "MASTER",
];

const FILL_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// cells a selection needs before it is checked against the targets
const MIN_SELECTION: usize = 3;

/// Outcome of one cell tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Found cell or out of range.
    Ignored,
    /// Cell selected or deselected; no evaluation verdict yet.
    SelectionChanged,
    /// The selection spelled an unfound target (forward or reversed).
    WordFound(String),
    /// The selection was checked and matched nothing. The selection
    /// stays on the board — it may still grow into a longer target —
    /// until a deferred clear drops it.
    Missed,
}

#[derive(Debug, Clone, Copy)]
pub struct LetterCell {
    pub letter: char,
    pub found: bool,
    pub selected: bool,
}

#[derive(Debug, Clone)]
struct TargetWord {
    word: String,
    found: bool,
}

/// Letter grid with up to four target words laid out horizontally on
/// even rows. Matching is a flat concatenation check over the selected
/// cells in tap order — deliberately not a line trace, so order matters
/// but adjacency does not.
#[derive(Debug, Clone)]
pub struct WordSearchBoard {
    grid: Vec<Vec<LetterCell>>,
    words: Vec<TargetWord>,
    found_count: usize,
    selection: Vec<(usize, usize)>,
    selection_text: String,
}

impl WordSearchBoard {
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let size = size.max(2);
        let word_count = (size / 2).clamp(1, 4);
        let words: Vec<TargetWord> = WORD_POOL[..word_count]
            .iter()
            .map(|&word| TargetWord {
                word: word.to_string(),
                found: false,
            })
            .collect();

        let mut grid = vec![vec![None::<char>; size]; size];
        // word k occupies row 2k from column 0, truncated at the edge
        for (index, target) in words.iter().enumerate() {
            let row = index * 2;
            if row >= size {
                break;
            }
            for (col, letter) in target.word.chars().take(size).enumerate() {
                grid[row][col] = Some(letter);
            }
        }
        let grid = grid
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|slot| LetterCell {
                        letter: slot.unwrap_or_else(|| {
                            FILL_LETTERS[rng.random_range(0..FILL_LETTERS.len())] as char
                        }),
                        found: false,
                        selected: false,
                    })
                    .collect()
            })
            .collect();
        trace!(target: "word_search", "New {}x{} board, {} targets", size, size, word_count);
        Self {
            grid,
            words,
            found_count: 0,
            selection: Vec::new(),
            selection_text: String::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.grid.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&LetterCell> {
        self.grid.get(row)?.get(col)
    }

    pub fn target_words(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.word.as_str()).collect()
    }

    pub fn found_count(&self) -> usize {
        self.found_count
    }

    pub fn selection_text(&self) -> &str {
        &self.selection_text
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) -> ToggleOutcome {
        let Some(cell) = self.grid.get_mut(row).and_then(|r| r.get_mut(col)) else {
            return ToggleOutcome::Ignored;
        };
        if cell.found {
            return ToggleOutcome::Ignored;
        }
        if cell.selected {
            cell.selected = false;
            self.selection.retain(|&position| position != (row, col));
            self.rebuild_selection_text();
        } else {
            cell.selected = true;
            self.selection.push((row, col));
            self.selection_text.push(cell.letter);
        }
        if self.selection.len() >= MIN_SELECTION {
            self.evaluate_selection()
        } else {
            ToggleOutcome::SelectionChanged
        }
    }

    fn rebuild_selection_text(&mut self) {
        self.selection_text = self
            .selection
            .iter()
            .map(|&(row, col)| self.grid[row][col].letter)
            .collect();
    }

    fn evaluate_selection(&mut self) -> ToggleOutcome {
        let reversed: String = self.selection_text.chars().rev().collect();
        let hit = self.words.iter().position(|target| {
            !target.found && (target.word == self.selection_text || target.word == reversed)
        });
        match hit {
            Some(index) => {
                self.words[index].found = true;
                self.found_count += 1;
                for &(row, col) in &self.selection {
                    self.grid[row][col].found = true;
                    self.grid[row][col].selected = false;
                }
                self.selection.clear();
                self.selection_text.clear();
                ToggleOutcome::WordFound(self.words[index].word.clone())
            }
            None => ToggleOutcome::Missed,
        }
    }

    /// Deferred miss reveal: drops the current selection.
    pub fn clear_selection(&mut self) {
        for &(row, col) in &self.selection {
            self.grid[row][col].selected = false;
        }
        self.selection.clear();
        self.selection_text.clear();
    }

    pub fn is_won(&self) -> bool {
        self.found_count == self.words.len()
    }

    pub fn progress_percent(&self) -> f64 {
        self.found_count as f64 / self.words.len() as f64 * 100.0
    }

    /// Keeps the letters but forgets every find and selection.
    pub fn shuffle(&mut self) {
        for (row, col) in iproduct!(0..self.grid.len(), 0..self.grid.len()) {
            self.grid[row][col].found = false;
            self.grid[row][col].selected = false;
        }
        for target in &mut self.words {
            target.found = false;
        }
        self.found_count = 0;
        self.selection.clear();
        self.selection_text.clear();
    }
}
