use log::trace;
use rand::Rng;

pub const BOARD_WIDTH: f64 = 400.0;
pub const BOARD_HEIGHT: f64 = 300.0;

// freshly dealt pieces scatter into [50, 250) on both axes
const SCATTER_SPAN: f64 = 200.0;
const SCATTER_OFFSET: f64 = 50.0;

/// Outcome of dropping a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The piece landed fully inside the board frame for the first time.
    Placed,
    /// The piece moved but is not (newly) inside the frame.
    Moved,
    /// The piece was placed before; its position still follows the drag.
    AlreadyPlaced,
    /// No such piece.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
pub struct JigsawPiece {
    pub x: f64,
    pub y: f64,
    pub placed: bool,
}

/// Drop-in-area jigsaw: a piece counts as placed once its bounding box
/// lies entirely inside the board box, in any order and at any spot.
/// Placement is one-way; only a shuffle un-places pieces.
#[derive(Debug, Clone)]
pub struct JigsawBoard {
    pieces: Vec<JigsawPiece>,
    piece_width: f64,
    piece_height: f64,
    placed_count: usize,
}

impl JigsawBoard {
    pub fn new<R: Rng + ?Sized>(piece_count: usize, rng: &mut R) -> Self {
        let piece_count = piece_count.max(1);
        let per_side = (piece_count as f64).sqrt().ceil();
        let pieces = (0..piece_count).map(|_| Self::scattered(&mut *rng)).collect();
        trace!(target: "jigsaw", "New board with {} pieces", piece_count);
        Self {
            pieces,
            piece_width: BOARD_WIDTH / per_side,
            piece_height: BOARD_HEIGHT / per_side,
            placed_count: 0,
        }
    }

    fn scattered<R: Rng + ?Sized>(rng: &mut R) -> JigsawPiece {
        JigsawPiece {
            x: SCATTER_OFFSET + rng.random_range(0.0..SCATTER_SPAN),
            y: SCATTER_OFFSET + rng.random_range(0.0..SCATTER_SPAN),
            placed: false,
        }
    }

    pub fn pieces(&self) -> &[JigsawPiece] {
        &self.pieces
    }

    pub fn piece_size(&self) -> (f64, f64) {
        (self.piece_width, self.piece_height)
    }

    pub fn placed_count(&self) -> usize {
        self.placed_count
    }

    /// Moves `piece` to `(x, y)` (its top-left corner) and checks
    /// containment. The exact-fit boundary counts as inside.
    pub fn attempt_place(&mut self, piece: usize, x: f64, y: f64) -> PlaceOutcome {
        let (width, height) = (self.piece_width, self.piece_height);
        let Some(target) = self.pieces.get_mut(piece) else {
            return PlaceOutcome::Ignored;
        };
        target.x = x;
        target.y = y;
        if target.placed {
            return PlaceOutcome::AlreadyPlaced;
        }
        let inside =
            x >= 0.0 && y >= 0.0 && x + width <= BOARD_WIDTH && y + height <= BOARD_HEIGHT;
        if !inside {
            return PlaceOutcome::Moved;
        }
        target.placed = true;
        self.placed_count += 1;
        PlaceOutcome::Placed
    }

    pub fn is_won(&self) -> bool {
        self.placed_count == self.pieces.len()
    }

    pub fn progress_percent(&self) -> f64 {
        self.placed_count as f64 / self.pieces.len() as f64 * 100.0
    }

    /// Re-scatters every piece and clears all placements.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for piece in &mut self.pieces {
            *piece = Self::scattered(&mut *rng);
        }
        self.placed_count = 0;
    }
}
