use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::SearchError;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;
pub const BLANK: u8 = 0;

/// A 3x3 tile arrangement, row-major. `0` is the blank.
pub type Tiles = [u8; CELLS];

pub const GOAL: Tiles = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Positions reachable from each cell by one orthogonal step.
///
/// The order of each entry decides which candidate wins a ranking tie.
pub const ADJACENCY: [&[usize]; CELLS] = [
    &[1, 3],
    &[0, 2, 4],
    &[1, 5],
    &[0, 4, 6],
    &[1, 3, 5, 7],
    &[2, 4, 8],
    &[3, 7],
    &[4, 6, 8],
    &[5, 7],
];

/// Direction a tile slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    /// Offset applied to the blank's (row, col) when a tile slides this way.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    /// The move that carries the blank from `from` to `to`, if they are adjacent.
    pub fn between(from: usize, to: usize) -> Option<Self> {
        let (row, col) = ((from / SIZE) as isize, (from % SIZE) as isize);
        let target = ((to / SIZE) as isize, (to % SIZE) as isize);

        [Move::Up, Move::Left, Move::Down, Move::Right]
            .into_iter()
            .find(|movement| {
                let (dr, dc) = movement.as_offset();
                (row + dr, col + dc) == target
            })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One node of the search: an arrangement and the depth it was reached at.
///
/// Heuristic distance, solvability and blank position are always derived
/// from the current tiles, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    tiles: Tiles,
    depth: usize,
}

impl PuzzleState {
    /// A uniformly shuffled arrangement at depth 1. May be unsolvable.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles: Tiles = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        tiles.shuffle(rng);
        Self { tiles, depth: 1 }
    }

    /// A depth-1 state from an explicit arrangement.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidArrangement`] unless `tiles` is a
    /// permutation of `0..=8`.
    pub fn from_tiles(tiles: &[u8]) -> Result<Self, SearchError> {
        let invalid = || SearchError::InvalidArrangement(tiles.to_vec());
        let arrangement: Tiles = tiles.try_into().map_err(|_| invalid())?;

        let mut seen = [false; CELLS];
        for &value in &arrangement {
            let slot = seen.get_mut(value as usize).ok_or_else(invalid)?;
            if *slot {
                return Err(invalid());
            }
            *slot = true;
        }

        Ok(Self {
            tiles: arrangement,
            depth: 1,
        })
    }

    /// Copy of `parent` one level deeper. The caller applies the move with
    /// [`PuzzleState::swap`].
    pub fn from_parent(parent: &PuzzleState) -> Self {
        Self {
            tiles: parent.tiles,
            depth: parent.depth + 1,
        }
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Exchanges two cells. Only swaps involving the blank are legal moves;
    /// that is left to the caller.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.tiles.swap(a, b);
    }

    pub fn blank_position(&self) -> usize {
        self.tiles
            .iter()
            .position(|&t| t == BLANK)
            .expect("arrangement is a permutation and always holds a blank")
    }

    pub fn neighbors(&self) -> &'static [usize] {
        ADJACENCY[self.blank_position()]
    }

    pub fn is_goal(&self) -> bool {
        self.tiles == GOAL
    }

    /// Solvable iff the inversion count over non-blank tiles is even.
    pub fn is_solvable(&self) -> bool {
        count_inversions(&self.tiles) % 2 == 0
    }

    /// Sum of Manhattan distances of every non-blank tile to its goal cell.
    pub fn heuristic(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != BLANK)
            .map(|(i, &value)| {
                let target = (value - 1) as usize;
                (i / SIZE).abs_diff(target / SIZE) + (i % SIZE).abs_diff(target % SIZE)
            })
            .sum()
    }
}

pub fn count_inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != BLANK)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != BLANK && next < val)
                .count()
        })
        .sum()
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(SIZE) {
            for &val in row {
                if val == BLANK {
                    write!(f, " . ")?;
                } else {
                    write!(f, "{:2} ", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
