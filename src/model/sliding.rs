use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

/// Outcome of one tile press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    Moved,
    Rejected,
}

/// Classic N×N fifteen-style board. `tiles` is always a permutation of
/// `0..N²` with `0` standing for the blank; `empty_index` tracks the
/// blank's position.
#[derive(Debug, Clone)]
pub struct SlidingBoard {
    tiles: Vec<u16>,
    empty_index: usize,
    size: usize,
}

impl SlidingBoard {
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let size = size.max(2);
        let total = size * size;
        let mut tiles: Vec<u16> = (1..total as u16).collect();
        tiles.push(0);
        tiles.shuffle(rng);
        let empty_index = Self::blank_position(&tiles);
        trace!(target: "sliding", "New {}x{} board: {:?}", size, size, tiles);
        Self {
            tiles,
            empty_index,
            size,
        }
    }

    /// Restores a board from an explicit layout. Returns `None` unless
    /// `tiles` is a permutation of `0..size²`.
    pub fn from_tiles(tiles: Vec<u16>, size: usize) -> Option<Self> {
        let total = size * size;
        if size < 2 || tiles.len() != total {
            return None;
        }
        let mut seen = vec![false; total];
        for &tile in &tiles {
            let slot = seen.get_mut(tile as usize)?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        let empty_index = Self::blank_position(&tiles);
        Some(Self {
            tiles,
            empty_index,
            size,
        })
    }

    fn blank_position(tiles: &[u16]) -> usize {
        tiles
            .iter()
            .position(|&t| t == 0)
            .unwrap_or(tiles.len() - 1)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    pub fn empty_index(&self) -> usize {
        self.empty_index
    }

    /// Slides the tile at `tile_index` into the blank if the two are
    /// 4-adjacent. Anything else leaves the board untouched.
    pub fn attempt_move(&mut self, tile_index: usize) -> SlideOutcome {
        if tile_index >= self.tiles.len() {
            return SlideOutcome::Rejected;
        }
        let size = self.size;
        let (row, col) = (tile_index / size, tile_index % size);
        let (empty_row, empty_col) = (self.empty_index / size, self.empty_index % size);
        let adjacent = (row.abs_diff(empty_row) == 1 && col == empty_col)
            || (col.abs_diff(empty_col) == 1 && row == empty_row);
        if !adjacent {
            return SlideOutcome::Rejected;
        }
        self.tiles.swap(tile_index, self.empty_index);
        self.empty_index = tile_index;
        SlideOutcome::Moved
    }

    /// True when the tiles read `1, 2, .., N²-1` with the blank last.
    pub fn is_won(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles[last] == 0
            && self.tiles[..last]
                .iter()
                .enumerate()
                .all(|(i, &tile)| tile as usize == i + 1)
    }

    /// Share of non-blank tiles already in their home slot, 0-100.
    pub fn progress_percent(&self) -> f64 {
        let scored = self.tiles.len() - 1;
        let correct = self.tiles[..scored]
            .iter()
            .enumerate()
            .filter(|&(i, &tile)| tile as usize == i + 1)
            .count();
        correct as f64 / scored as f64 * 100.0
    }

    /// Uniform re-shuffle. No solvability guarantee: the permutation
    /// parity is not constrained.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
        self.empty_index = Self::blank_position(&self.tiles);
    }
}
