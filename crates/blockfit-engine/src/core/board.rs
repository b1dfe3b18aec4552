use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{BOARD_SIZE, piece::BlockColor};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Block {
    /// No piece covers the cell.
    #[default]
    Empty,
    /// The cell was filled by a piece of the given color.
    Filled(BlockColor),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({row}, {col}) is outside the 8x8 board")]
pub struct OutOfBoundsError {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FillError {
    #[display("{_0}")]
    OutOfBounds(OutOfBoundsError),
    #[display("cell ({row}, {col}) is already filled")]
    CellOccupied { row: usize, col: usize },
}

impl From<OutOfBoundsError> for FillError {
    fn from(err: OutOfBoundsError) -> Self {
        FillError::OutOfBounds(err)
    }
}

fn check_bounds(row: usize, col: usize) -> Result<(), OutOfBoundsError> {
    if row < BOARD_SIZE && col < BOARD_SIZE {
        Ok(())
    } else {
        Err(OutOfBoundsError { row, col })
    }
}

/// A set of board cells, one bit per cell.
///
/// Bit `row * BOARD_SIZE + col` stands for `(row, col)`, so a set can never
/// hold a position twice or a position outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet {
    bits: u64,
}

const _: () = assert!(BOARD_SIZE * BOARD_SIZE <= u64::BITS as usize);

impl CellSet {
    pub const EMPTY: Self = Self { bits: 0 };

    /// Every cell of the board.
    pub const FULL: Self = Self {
        bits: u64::MAX >> (u64::BITS as usize - BOARD_SIZE * BOARD_SIZE),
    };

    const fn bit(row: usize, col: usize) -> u64 {
        1 << (row * BOARD_SIZE + col)
    }

    /// All cells of row `row`, which must be on the board.
    #[must_use]
    pub(crate) fn row(row: usize) -> Self {
        (0..BOARD_SIZE).fold(Self::EMPTY, |set, col| Self {
            bits: set.bits | Self::bit(row, col),
        })
    }

    /// All cells of column `col`, which must be on the board.
    #[must_use]
    pub(crate) fn column(col: usize) -> Self {
        (0..BOARD_SIZE).fold(Self::EMPTY, |set, row| Self {
            bits: set.bits | Self::bit(row, col),
        })
    }

    pub fn insert(&mut self, row: usize, col: usize) -> Result<(), OutOfBoundsError> {
        check_bounds(row, col)?;
        self.bits |= Self::bit(row, col);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE && self.bits & Self::bit(row, col) != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns an iterator of `(row, col)` positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..BOARD_SIZE * BOARD_SIZE)
            .filter(move |i| self.bits & (1 << i) != 0)
            .map(|i| (i / BOARD_SIZE, i % BOARD_SIZE))
    }
}

/// The square grid of cells pieces are placed on.
///
/// The board has fixed dimensions for its whole lifetime. Cells only move
/// between [`Block::Empty`] and [`Block::Filled`]: [`Board::fill`] refuses to
/// overwrite a filled cell, so a color never changes without the cell being
/// cleared first.
///
/// # Example
///
/// ```
/// use blockfit_engine::{BlockColor, Board};
///
/// let mut board = Board::EMPTY;
/// board.fill(2, 3, BlockColor::Red).unwrap();
///
/// assert_eq!(board.is_occupied(2, 3), Ok(true));
/// assert!(board.fill(2, 3, BlockColor::Blue).is_err());
/// assert!(board.is_occupied(8, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Board {
    rows: [[Block; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;

    pub const EMPTY: Self = Self {
        rows: [[Block::Empty; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Returns the block at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Result<Block, OutOfBoundsError> {
        check_bounds(row, col)?;
        Ok(self.rows[row][col])
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool, OutOfBoundsError> {
        self.cell(row, col).map(Block::is_filled)
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_SIZE]> {
        self.rows.iter()
    }

    /// Fills the empty cell at `(row, col)` with `color`.
    pub fn fill(&mut self, row: usize, col: usize, color: BlockColor) -> Result<(), FillError> {
        if self.is_occupied(row, col)? {
            return Err(FillError::CellOccupied { row, col });
        }
        self.rows[row][col] = Block::Filled(color);
        Ok(())
    }

    /// Empties every cell of `cells` and returns the cells that were filled.
    ///
    /// Cells that are already empty are left alone, so clearing the same set
    /// twice has the same effect as clearing it once.
    pub fn clear_cells(&mut self, cells: &CellSet) -> CellSet {
        let mut cleared = CellSet::EMPTY;
        for (row, col) in cells.iter() {
            let cell = &mut self.rows[row][col];
            if cell.is_filled() {
                *cell = Block::Empty;
                // `cells` only holds in-bounds positions.
                cleared.bits |= CellSet::bit(row, col);
            }
        }
        cleared
    }

    /// Indices of rows whose cells are all filled, ascending.
    #[must_use]
    pub fn full_rows(&self) -> ArrayVec<usize, BOARD_SIZE> {
        (0..BOARD_SIZE)
            .filter(|&row| self.rows[row].iter().all(|b| b.is_filled()))
            .collect()
    }

    /// Indices of columns whose cells are all filled, ascending.
    #[must_use]
    pub fn full_columns(&self) -> ArrayVec<usize, BOARD_SIZE> {
        (0..BOARD_SIZE)
            .filter(|&col| self.rows.iter().all(|row| row[col].is_filled()))
            .collect()
    }

    /// Number of filled cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|b| b.is_filled()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// `.` is an empty cell; `#` or a color character (`R`, `O`, `Y`, `G`,
    /// `B`, `P`) is a filled one (`#` fills with red). Rows are given top to
    /// bottom; missing trailing rows stay empty.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly 8 cells or there are more than 8
    /// rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_SIZE,
            "Board must have at most {BOARD_SIZE} rows, got {}",
            lines.len()
        );

        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<Block> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => Block::Empty,
                    '#' => Block::Filled(BlockColor::Red),
                    c => BlockColor::ALL
                        .into_iter()
                        .find(|color| color.as_char() == c)
                        .map(Block::Filled)
                        .unwrap_or_else(|| panic!("Invalid board character {c:?}")),
                })
                .collect();
            assert_eq!(
                cells.len(),
                BOARD_SIZE,
                "Each row must have exactly {BOARD_SIZE} cells, got {} at row {row}",
                cells.len()
            );
            board.rows[row].copy_from_slice(&cells);
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for block in row {
                let ch = match block {
                    Block::Empty => '.',
                    Block::Filled(color) => color.as_char(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
