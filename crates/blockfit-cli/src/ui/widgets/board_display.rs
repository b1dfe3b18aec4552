use std::iter;

use blockfit_engine::{BOARD_SIZE, Board, Piece, is_valid_placement};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// Piece drawn over the board at an anchor.
#[derive(Debug, Clone, Copy)]
struct Overlay {
    piece: Piece,
    anchor_row: isize,
    anchor_col: isize,
}

impl Overlay {
    fn covers(&self, row: usize, col: usize) -> bool {
        let (Ok(row), Ok(col)) = (isize::try_from(row), isize::try_from(col)) else {
            return false;
        };
        self.piece.occupied_cells().any(|(dr, dc)| {
            self.anchor_row.checked_add_unsigned(dr) == Some(row)
                && self.anchor_col.checked_add_unsigned(dc) == Some(col)
        })
    }
}

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    overlay: Option<Overlay>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            overlay: None,
            block: None,
        }
    }

    pub fn overlay(self, piece: Piece, anchor_row: isize, anchor_col: isize) -> Self {
        Self {
            overlay: Some(Overlay {
                piece,
                anchor_row,
                anchor_col,
            }),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_SIZE as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_SIZE as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let fits = self.overlay.is_some_and(|overlay| {
            is_valid_placement(
                self.board,
                overlay.anchor_row,
                overlay.anchor_col,
                Some(&overlay.piece),
            )
        });

        let col_constraints = (0..BOARD_SIZE).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..BOARD_SIZE).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_SIZE>(&horizontal));

        for (row, (grid_row, blocks)) in iter::zip(grid_cells, self.board.rows()).enumerate() {
            for (col, (grid_cell, block)) in iter::zip(grid_row, blocks).enumerate() {
                let is_covered = self
                    .overlay
                    .is_some_and(|overlay| overlay.covers(row, col));
                let block_display = if is_covered {
                    BlockDisplay::overlay(fits)
                } else {
                    BlockDisplay::from_block(*block, true)
                };
                block_display.render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfit_engine::{BlockColor, PieceShape};

    use super::*;

    #[test]
    fn test_overlay_covers_piece_cells() {
        let piece = Piece::new(PieceShape::from_ascii("#./##").unwrap(), BlockColor::Red);
        let overlay = Overlay {
            piece,
            anchor_row: 2,
            anchor_col: 3,
        };
        assert!(overlay.covers(2, 3));
        assert!(!overlay.covers(2, 4));
        assert!(overlay.covers(3, 4));
        assert!(!overlay.covers(0, 0));
    }

    #[test]
    fn test_size_includes_border() {
        let board = Board::EMPTY;
        let display = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!(display.width(), 18);
        assert_eq!(display.height(), 10);
    }
}
