use arrayvec::ArrayVec;

use crate::core::{BOARD_SIZE, Board, CellSet};

/// Points awarded per cleared line before the combo multiplier.
pub const POINTS_PER_LINE: usize = 100;

/// Combo multipliers in halves, indexed by line count (4 and up share the last
/// entry): ×1, ×1.5, ×2, ×3.
const MULTIPLIER_HALVES: [usize; 5] = [0, 2, 3, 4, 6];

fn multiplier_halves(line_count: usize) -> usize {
    MULTIPLIER_HALVES[line_count.min(MULTIPLIER_HALVES.len() - 1)]
}

/// Returns the combo multiplier for clearing `line_count` lines at once.
///
/// # Example
///
/// ```
/// use blockfit_engine::combo_multiplier;
///
/// assert_eq!(combo_multiplier(0), 0.0);
/// assert_eq!(combo_multiplier(2), 1.5);
/// assert_eq!(combo_multiplier(7), 3.0);
/// ```
#[must_use]
pub fn combo_multiplier(line_count: usize) -> f64 {
    f64::from(u8::try_from(multiplier_halves(line_count)).unwrap_or(u8::MAX)) / 2.0
}

/// Returns the points for clearing `line_count` lines with one placement.
///
/// This is `line_count * POINTS_PER_LINE * multiplier`. Every multiplier is a
/// multiple of one half and `POINTS_PER_LINE` is even, so the product is
/// always a whole number and computed without rounding.
#[must_use]
pub fn combo_points(line_count: usize) -> usize {
    line_count * POINTS_PER_LINE * multiplier_halves(line_count) / 2
}

/// Result of clearing the full lines left by a placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    rows: ArrayVec<usize, BOARD_SIZE>,
    columns: ArrayVec<usize, BOARD_SIZE>,
    cells: CellSet,
    points: usize,
}

impl LineClear {
    /// Finds the full rows and columns of `board` without changing it.
    ///
    /// Returns `None` when no line is full.
    #[must_use]
    pub fn detect(board: &Board) -> Option<Self> {
        let rows = board.full_rows();
        let columns = board.full_columns();
        if rows.is_empty() && columns.is_empty() {
            return None;
        }

        let cells = rows
            .iter()
            .map(|&row| CellSet::row(row))
            .chain(columns.iter().map(|&col| CellSet::column(col)))
            .fold(CellSet::EMPTY, CellSet::union);
        let points = combo_points(rows.len() + columns.len());
        Some(Self {
            rows,
            columns,
            cells,
            points,
        })
    }

    /// Full rows, ascending.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Full columns, ascending.
    #[must_use]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Combo count: rows and columns counted separately, even where they
    /// share a cell.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    /// Union of the cells of all full lines; shared cells appear once.
    #[must_use]
    pub fn cells(&self) -> &CellSet {
        &self.cells
    }

    #[must_use]
    pub fn points(&self) -> usize {
        self.points
    }
}

/// Clears every full row and column of `board` in one step.
///
/// Full lines are detected before any cell is emptied, so a cell where a full
/// row crosses a full column counts for both lines and is cleared once.
/// Returns `None`, leaving the board untouched, when nothing is full.
pub fn clear_full_lines(board: &mut Board) -> Option<LineClear> {
    let clear = LineClear::detect(board)?;
    board.clear_cells(clear.cells());
    Some(clear)
}
