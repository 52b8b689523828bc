use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// A direction the blank cell can move in, relative to its own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row/column offset applied to the blank cell.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    Empty,
    NotSquare(usize),
    NotAPermutation,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Empty => write!(f, "board has no cells"),
            BoardError::NotSquare(len) => write!(f, "{} cells do not form a square grid", len),
            BoardError::NotAPermutation => {
                write!(f, "tiles are not a permutation of 1..=n\u{b2}")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// One puzzle configuration: tiles in row-major order, with the value
/// `size * size` standing in for the blank cell. Boards are immutable;
/// every transformation yields a new value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    size: usize,
    tiles: Vec<u8>,
    blank: usize,
}

impl Board {
    /// Builds a board from row-major tiles, validating that the length is
    /// a square and the values are a permutation of `1..=n*n`.
    pub fn new(tiles: Vec<u8>) -> Result<Self, BoardError> {
        if tiles.is_empty() {
            return Err(BoardError::Empty);
        }
        let size = (tiles.len() as f64).sqrt().round() as usize;
        if size * size != tiles.len() {
            return Err(BoardError::NotSquare(tiles.len()));
        }
        let mut seen = vec![false; tiles.len() + 1];
        for &t in &tiles {
            let t = t as usize;
            if t == 0 || t > tiles.len() || seen[t] {
                return Err(BoardError::NotAPermutation);
            }
            seen[t] = true;
        }
        let blank_value = tiles.len() as u8;
        let blank = tiles.iter().position(|&t| t == blank_value).ok_or(BoardError::NotAPermutation)?;
        Ok(Board { size, tiles, blank })
    }

    /// The canonical goal: tiles in order, blank in the bottom-right cell.
    pub fn solved(size: usize) -> Self {
        let tiles: Vec<u8> = (1..=(size * size) as u8).collect();
        Board {
            size,
            blank: size * size - 1,
            tiles,
        }
    }

    /// A solvable board produced by walking `steps` random moves backwards
    /// from the solved configuration.
    pub fn scrambled(size: usize, steps: usize, rng: &mut impl Rng) -> Self {
        let mut board = Board::solved(size);
        for _ in 0..steps {
            let reachable: Vec<Board> = Move::ALL.iter().filter_map(|&m| board.apply(m)).collect();
            if let Some(next) = reachable.choose(rng) {
                board = next.clone();
            }
        }
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Row-major index of the blank cell.
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Slides the blank one cell in `mv`'s direction, returning the new
    /// board, or `None` when that cell lies outside the grid.
    pub fn apply(&self, mv: Move) -> Option<Board> {
        let (dr, dc) = mv.offset();
        let row = (self.blank / self.size) as isize + dr;
        let col = (self.blank % self.size) as isize + dc;
        if row < 0 || row >= self.size as isize || col < 0 || col >= self.size as isize {
            return None;
        }
        let target = row as usize * self.size + col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Board {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Whether any sequence of moves can carry this board into `goal`.
    ///
    /// Compares parity signatures: inversion count ignoring the blank,
    /// folding in the blank's row for even side lengths.
    pub fn is_solvable_to(&self, goal: &Board) -> bool {
        self.size == goal.size && self.parity_signature() == goal.parity_signature()
    }

    fn parity_signature(&self) -> usize {
        if self.size % 2 == 1 {
            self.inversions() % 2
        } else {
            (self.inversions() + self.blank / self.size) % 2
        }
    }

    fn inversions(&self) -> usize {
        let blank_value = (self.size * self.size) as u8;
        let mut count = 0;
        for (i, &a) in self.tiles.iter().enumerate() {
            if a == blank_value {
                continue;
            }
            count += self.tiles[i + 1..]
                .iter()
                .filter(|&&b| b != blank_value && b < a)
                .count();
        }
        count
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blank_value = (self.size * self.size) as u8;
        for row in self.tiles.chunks(self.size) {
            for &val in row {
                if val == blank_value {
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
