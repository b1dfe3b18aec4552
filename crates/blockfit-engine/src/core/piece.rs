use std::{fmt, str::FromStr};

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest width or height a piece shape may have.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Color token of a piece, drawn from a fixed six-entry palette.
///
/// The color is opaque to the rules: it only travels from the piece to the
/// board cells it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum BlockColor {
    Red = 0,
    Orange = 1,
    Yellow = 2,
    Green = 3,
    Blue = 4,
    Purple = 5,
}

impl Distribution<BlockColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockColor {
        BlockColor::ALL[rng.random_range(0..BlockColor::LEN)]
    }
}

impl BlockColor {
    /// Number of palette entries (6).
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        BlockColor::Red,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Green,
        BlockColor::Blue,
        BlockColor::Purple,
    ];

    /// Returns the single character representation of this color.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfit_engine::BlockColor;
    ///
    /// assert_eq!(BlockColor::Red.as_char(), 'R');
    /// assert_eq!(BlockColor::Purple.as_char(), 'P');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            BlockColor::Red => 'R',
            BlockColor::Orange => 'O',
            BlockColor::Yellow => 'Y',
            BlockColor::Green => 'G',
            BlockColor::Blue => 'B',
            BlockColor::Purple => 'P',
        }
    }
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no cells")]
    Empty,
    #[display("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("shape is {width}x{height}, larger than the 4x4 limit")]
    TooLarge { width: usize, height: usize },
    #[display("shape has no occupied cell")]
    NoOccupiedCell,
    #[display("invalid shape character {ch:?}")]
    InvalidChar { ch: char },
}

/// Occupancy matrix of a piece with explicit width and height.
///
/// Each row is stored as a bit mask where bit `c` is column `c`. The matrix
/// is always at least 1×1, at most [`MAX_SHAPE_SIZE`] on each side, and has
/// at least one occupied cell; constructors reject anything else.
///
/// # Text Format
///
/// Shapes print (and serialize) as their rows joined by `/`, with `#` for an
/// occupied cell and `.` for an empty one:
///
/// ```
/// use blockfit_engine::PieceShape;
///
/// let t: PieceShape = "###/.#.".parse().unwrap();
/// assert_eq!((t.height(), t.width()), (2, 3));
/// assert_eq!(t.to_string(), "###/.#.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    width: u8,
    height: u8,
    rows: [u8; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Builds a shape from a cell matrix in a const context.
    ///
    /// Used for the built-in shape tables; the checks fail compilation
    /// instead of returning an error.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn from_cells<const W: usize, const H: usize>(cells: [[bool; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut rows = [0; MAX_SHAPE_SIZE];
        let mut occupied = false;
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                if cells[y][x] {
                    rows[y] |= 1 << x;
                    occupied = true;
                }
                x += 1;
            }
            y += 1;
        }
        assert!(occupied, "shape must have at least one occupied cell");
        Self {
            width: W as u8,
            height: H as u8,
            rows,
        }
    }

    /// Builds a shape from rows of cells, validating its dimensions.
    #[expect(clippy::cast_possible_truncation)]
    pub fn new<R>(cells: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[bool]>,
    {
        let height = cells.len();
        let width = cells.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(ShapeError::Empty);
        }
        for (row, cells) in cells.iter().enumerate() {
            let len = cells.as_ref().len();
            if len != width {
                return Err(ShapeError::Ragged {
                    row,
                    len,
                    expected: width,
                });
            }
        }
        if width > MAX_SHAPE_SIZE || height > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge { width, height });
        }

        let mut rows = [0; MAX_SHAPE_SIZE];
        for (mask, cells) in rows.iter_mut().zip(cells) {
            for (x, _) in cells.as_ref().iter().enumerate().filter(|(_, c)| **c) {
                *mask |= 1 << x;
            }
        }
        if rows.iter().all(|mask| *mask == 0) {
            return Err(ShapeError::NoOccupiedCell);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            rows,
        })
    }

    /// Parses a shape from `#`/`.` art.
    ///
    /// Rows are separated by `/` or newlines; blank lines and surrounding
    /// whitespace are ignored.
    pub fn from_ascii(art: &str) -> Result<Self, ShapeError> {
        let mut cells = Vec::new();
        for line in art.split(['/', '\n']) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .chars()
                .map(|ch| match ch {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    _ => Err(ShapeError::InvalidChar { ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(row);
        }
        Self::new(&cells)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether the cell at `(row, col)` is occupied.
    ///
    /// Positions outside the matrix are reported as empty.
    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && (self.rows[row] >> col) & 1 != 0
    }

    /// Returns an iterator of occupied `(row, col)` offsets in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width())
                .filter(move |&col| self.is_occupied(row, col))
                .map(move |col| (row, col))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|mask| mask.count_ones() as usize).sum()
    }

    /// Returns the shape turned by a quarter turn.
    ///
    /// An R×C matrix becomes C×R. Clockwise maps `(r, c)` to `(c, R-1-r)`;
    /// counter-clockwise maps `(r, c)` to `(C-1-c, r)`.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let (height, width) = (self.height(), self.width());
        let mut rows = [0; MAX_SHAPE_SIZE];
        for (r, c) in self.occupied_cells() {
            let (row, col) = match rotation {
                Rotation::Clockwise => (c, height - 1 - r),
                Rotation::CounterClockwise => (width - 1 - c, r),
            };
            rows[row] |= 1 << col;
        }
        Self {
            width: self.height,
            height: self.width,
            rows,
        }
    }
}

impl fmt::Display for PieceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                f.write_str("/")?;
            }
            for col in 0..self.width() {
                f.write_str(if self.is_occupied(row, col) { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl FromStr for PieceShape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s)
    }
}

impl Serialize for PieceShape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceShape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_ascii(&s)
            .map_err(|e| serde::de::Error::custom(format!("invalid piece shape '{s}': {e}")))
    }
}

/// A polyomino offered to the player: a shape plus one color.
///
/// Pieces are values. Rotation returns a new piece with the turned shape and
/// the same color.
///
/// # Example
///
/// ```
/// use blockfit_engine::{BlockColor, Piece, PieceShape, Rotation};
///
/// let shape: PieceShape = "#./#./##".parse().unwrap();
/// let piece = Piece::new(shape, BlockColor::Blue);
/// let turned = piece.rotated(Rotation::Clockwise);
///
/// assert_eq!(turned.shape().to_string(), "###/#..");
/// assert_eq!(turned.color(), BlockColor::Blue);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Piece {
    shape: PieceShape,
    color: BlockColor,
}

impl Piece {
    #[must_use]
    pub const fn new(shape: PieceShape, color: BlockColor) -> Self {
        Self { shape, color }
    }

    #[must_use]
    pub const fn shape(&self) -> &PieceShape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> BlockColor {
        self.color
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.shape.occupied_cells()
    }

    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        Self {
            shape: self.shape.rotated(rotation),
            color: self.color,
        }
    }
}
