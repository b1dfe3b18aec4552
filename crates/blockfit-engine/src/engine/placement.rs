use crate::core::{BOARD_SIZE, Board, Piece};

/// Maps a piece cell offset onto the board, or `None` when it falls off.
fn target_cell(
    anchor_row: isize,
    anchor_col: isize,
    (dr, dc): (usize, usize),
) -> Option<(usize, usize)> {
    let row = anchor_row.checked_add_unsigned(dr)?;
    let col = anchor_col.checked_add_unsigned(dc)?;
    let row = usize::try_from(row).ok().filter(|r| *r < BOARD_SIZE)?;
    let col = usize::try_from(col).ok().filter(|c| *c < BOARD_SIZE)?;
    Some((row, col))
}

/// Checks whether `piece` fits on `board` with its (0, 0) cell at the anchor.
///
/// Every occupied cell of the piece must land inside the board and on an
/// empty cell. Anchors may be any integer, including ones that put the whole
/// piece off the board; those are simply rejected. An absent piece never
/// fits.
///
/// # Example
///
/// ```
/// use blockfit_engine::{BlockColor, Board, Piece, is_valid_placement};
///
/// let piece = Piece::new("##".parse().unwrap(), BlockColor::Red);
/// let board = Board::EMPTY;
///
/// assert!(is_valid_placement(&board, 0, 6, Some(&piece)));
/// assert!(!is_valid_placement(&board, 0, 7, Some(&piece)));
/// assert!(!is_valid_placement(&board, -1, 0, Some(&piece)));
/// assert!(!is_valid_placement(&board, 0, 0, None));
/// ```
#[must_use]
pub fn is_valid_placement(
    board: &Board,
    anchor_row: isize,
    anchor_col: isize,
    piece: Option<&Piece>,
) -> bool {
    let Some(piece) = piece else {
        return false;
    };
    piece.occupied_cells().all(|offset| {
        target_cell(anchor_row, anchor_col, offset)
            .is_some_and(|(row, col)| board.is_occupied(row, col) == Ok(false))
    })
}

/// Returns the board cells `piece` would cover at the anchor, if it fits.
pub(crate) fn placement_cells(
    board: &Board,
    anchor_row: isize,
    anchor_col: isize,
    piece: &Piece,
) -> Option<Vec<(usize, usize)>> {
    if !is_valid_placement(board, anchor_row, anchor_col, Some(piece)) {
        return None;
    }
    let cells = piece
        .occupied_cells()
        .filter_map(|offset| target_cell(anchor_row, anchor_col, offset))
        .collect();
    Some(cells)
}

/// Enumerates every on-board anchor where `piece` fits, in row-major order.
///
/// Anchors outside `[0, BOARD_SIZE)` never fit because the piece's (0, 0)
/// cell would leave the board's top or left edge, or because the whole piece
/// lies beyond its right or bottom edge.
pub fn valid_anchors<'a>(
    board: &'a Board,
    piece: &'a Piece,
) -> impl Iterator<Item = (isize, isize)> + 'a {
    all_anchors().filter(move |&(row, col)| is_valid_placement(board, row, col, Some(piece)))
}

/// Returns whether `piece` fits anywhere on `board`.
#[must_use]
pub fn fits_anywhere(board: &Board, piece: &Piece) -> bool {
    valid_anchors(board, piece).next().is_some()
}

#[expect(clippy::cast_possible_wrap)]
fn all_anchors() -> impl Iterator<Item = (isize, isize)> {
    let size = BOARD_SIZE as isize;
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}
