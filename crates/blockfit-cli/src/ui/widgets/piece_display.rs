use blockfit_engine::{Block, MAX_SHAPE_SIZE, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// A tray piece centered in a box big enough for any shape.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(piece: Option<Piece>) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        let (Ok(width), Ok(height)) = (u16::try_from(shape.width()), u16::try_from(shape.height()))
        else {
            return;
        };
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_block = BlockDisplay::from_block(Block::Filled(piece.color()), false);
        let empty_block = BlockDisplay::from_block(Block::Empty, false);
        for (row, grid_row) in grid_rows.enumerate() {
            for (col, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied(row, col) {
                    Widget::render(&occupied_block, grid_cell, buf);
                } else {
                    Widget::render(&empty_block, grid_cell, buf);
                }
            }
        }
    }
}
