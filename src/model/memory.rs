use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

/// Symbols dealt onto memory cards; each pair draws one.
pub const SYMBOL_POOL: [char; 18] = [
    '🎯', '🎨', '🎪', '🎭', '🎸', '🎹', '🎺', '🎻', '🎲', '🎳', '🏆', '🏅', '🏈', '🏉', '🏊',
    '🏋', '🏌', '🏍',
];

/// Outcome of one card tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Mid-resolution, face-up, matched, or out of range.
    Ignored,
    /// First card of a pair turned face-up.
    Flipped,
    /// Second card turned face-up; a resolution window is now open.
    PairFlipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairResolution {
    Matched,
    Mismatched,
}

#[derive(Debug, Clone, Copy)]
pub struct MemoryCard {
    pub symbol: char,
    pub face_up: bool,
    pub matched: bool,
}

/// Concentration board: every symbol appears on exactly two cards.
/// While a flipped pair awaits resolution, `is_processing` gates all
/// further input.
#[derive(Debug, Clone)]
pub struct MemoryBoard {
    cards: Vec<MemoryCard>,
    flipped: Vec<usize>,
    matched_pairs: usize,
    pair_count: usize,
    is_processing: bool,
}

impl MemoryBoard {
    pub fn new<R: Rng + ?Sized>(pair_count: usize, rng: &mut R) -> Self {
        // capped at the pool size so no symbol repeats across pairs
        let pair_count = pair_count.clamp(1, SYMBOL_POOL.len());
        let mut symbols: Vec<char> = SYMBOL_POOL[..pair_count]
            .iter()
            .flat_map(|&symbol| [symbol, symbol])
            .collect();
        symbols.shuffle(rng);
        trace!(target: "memory", "New board with {} pairs", pair_count);
        Self {
            cards: symbols
                .into_iter()
                .map(|symbol| MemoryCard {
                    symbol,
                    face_up: false,
                    matched: false,
                })
                .collect(),
            flipped: Vec::new(),
            matched_pairs: 0,
            pair_count,
            is_processing: false,
        }
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn flip(&mut self, card: usize) -> FlipOutcome {
        if self.is_processing {
            return FlipOutcome::Ignored;
        }
        let Some(target) = self.cards.get_mut(card) else {
            return FlipOutcome::Ignored;
        };
        if target.face_up || target.matched {
            return FlipOutcome::Ignored;
        }
        target.face_up = true;
        self.flipped.push(card);
        if self.flipped.len() == 2 {
            self.is_processing = true;
            FlipOutcome::PairFlipped
        } else {
            FlipOutcome::Flipped
        }
    }

    /// Compares the open pair. A match latches both cards immediately;
    /// a mismatch leaves them face-up until `finish_resolution` closes
    /// the window. Returns `None` when no pair is open.
    pub fn resolve_pair(&mut self) -> Option<PairResolution> {
        if self.flipped.len() != 2 {
            return None;
        }
        let (first, second) = (self.flipped[0], self.flipped[1]);
        if self.cards[first].symbol == self.cards[second].symbol {
            self.cards[first].matched = true;
            self.cards[second].matched = true;
            self.matched_pairs += 1;
            self.flipped.clear();
            Some(PairResolution::Matched)
        } else {
            Some(PairResolution::Mismatched)
        }
    }

    /// Closes the resolution window: unmatched face-up cards flip back
    /// down, the pair buffer empties, and input is accepted again.
    pub fn finish_resolution(&mut self) {
        for &index in &self.flipped {
            self.cards[index].face_up = false;
        }
        self.flipped.clear();
        self.is_processing = false;
    }

    pub fn is_won(&self) -> bool {
        self.matched_pairs == self.pair_count
    }

    pub fn progress_percent(&self) -> f64 {
        self.matched_pairs as f64 / self.pair_count as f64 * 100.0
    }

    /// Re-deals the same symbols face-down and forgets all matches.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut symbols: Vec<char> = self.cards.iter().map(|c| c.symbol).collect();
        symbols.shuffle(rng);
        for (card, symbol) in self.cards.iter_mut().zip(symbols) {
            *card = MemoryCard {
                symbol,
                face_up: false,
                matched: false,
            };
        }
        self.flipped.clear();
        self.matched_pairs = 0;
        self.is_processing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(pairs: usize) -> MemoryBoard {
        let mut rng = StdRng::seed_from_u64(21);
        MemoryBoard::new(pairs, &mut rng)
    }

    fn pair_indices(board: &MemoryBoard) -> (usize, usize) {
        let symbol = board.cards()[0].symbol;
        let partner = board
            .cards()
            .iter()
            .skip(1)
            .position(|c| c.symbol == symbol)
            .expect("every symbol appears twice")
            + 1;
        (0, partner)
    }

    fn mismatch_indices(board: &MemoryBoard) -> (usize, usize) {
        let symbol = board.cards()[0].symbol;
        let other = board
            .cards()
            .iter()
            .position(|c| c.symbol != symbol)
            .expect("more than one pair on the board");
        (0, other)
    }

    #[test]
    fn test_every_symbol_appears_exactly_twice() {
        let board = board(6);
        assert_eq!(board.cards().len(), 12);
        for card in board.cards() {
            let copies = board
                .cards()
                .iter()
                .filter(|c| c.symbol == card.symbol)
                .count();
            assert_eq!(copies, 2, "symbol {} duplicated", card.symbol);
        }
    }

    #[test]
    fn test_flip_matching_pair_latches_both() {
        let mut board = board(4);
        let (first, second) = pair_indices(&board);
        assert_eq!(board.flip(first), FlipOutcome::Flipped);
        assert_eq!(board.flip(second), FlipOutcome::PairFlipped);
        assert!(board.is_processing());

        assert_eq!(board.resolve_pair(), Some(PairResolution::Matched));
        board.finish_resolution();
        assert!(board.cards()[first].matched && board.cards()[second].matched);
        assert_eq!(board.matched_pairs(), 1);
        assert!(!board.is_processing());
        assert!(board.flipped().is_empty());
    }

    #[test]
    fn test_mismatch_resets_face_down_after_the_window() {
        let mut board = board(4);
        let (first, second) = mismatch_indices(&board);
        board.flip(first);
        assert_eq!(board.flip(second), FlipOutcome::PairFlipped);

        assert_eq!(board.resolve_pair(), Some(PairResolution::Mismatched));
        // cards stay revealed until the window closes
        assert!(board.cards()[first].face_up && board.cards()[second].face_up);
        board.finish_resolution();
        assert!(!board.cards()[first].face_up && !board.cards()[second].face_up);
        assert_eq!(board.matched_pairs(), 0);
    }

    #[test]
    fn test_flip_ignores_face_up_matched_and_processing() {
        let mut board = board(4);
        let (first, second) = pair_indices(&board);
        board.flip(first);
        assert_eq!(board.flip(first), FlipOutcome::Ignored, "already face-up");

        board.flip(second);
        assert_eq!(
            board.flip(3),
            FlipOutcome::Ignored,
            "input gated during resolution"
        );

        board.resolve_pair();
        board.finish_resolution();
        assert_eq!(board.flip(first), FlipOutcome::Ignored, "already matched");
        assert!(
            !board.flipped().contains(&first),
            "matched cards never re-enter the pair buffer"
        );
    }

    #[test]
    fn test_matching_all_pairs_wins() {
        let mut board = board(2);
        while !board.is_won() {
            let unmatched: Vec<usize> = (0..board.cards().len())
                .filter(|&i| !board.cards()[i].matched)
                .collect();
            let first = unmatched[0];
            let partner = unmatched
                .iter()
                .copied()
                .find(|&i| i != first && board.cards()[i].symbol == board.cards()[first].symbol)
                .unwrap();
            board.flip(first);
            board.flip(partner);
            assert_eq!(board.resolve_pair(), Some(PairResolution::Matched));
            board.finish_resolution();
        }
        assert_eq!(board.progress_percent(), 100.0);
    }

    #[test]
    fn test_pair_count_is_capped_by_the_pool() {
        let board = board(40);
        assert_eq!(board.pair_count(), SYMBOL_POOL.len());
    }

    #[test]
    fn test_shuffle_forgets_matches() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut board = MemoryBoard::new(3, &mut rng);
        let (first, second) = pair_indices(&board);
        board.flip(first);
        board.flip(second);
        board.resolve_pair();
        board.finish_resolution();
        assert_eq!(board.matched_pairs(), 1);

        board.shuffle(&mut rng);
        assert_eq!(board.matched_pairs(), 0);
        assert!(board
            .cards()
            .iter()
            .all(|c| !c.face_up && !c.matched));
    }
}
