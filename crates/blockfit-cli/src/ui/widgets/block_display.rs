use blockfit_engine::Block;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Block::Empty => Self::new(style::EMPTY, ""),
            Block::Filled(color) => Self::new(style::block_color(color), ""),
        }
    }

    /// A cell of the piece being aimed, tinted by whether it can be placed.
    pub fn overlay(fits: bool) -> Self {
        if fits {
            Self::new(style::FITS, "[]")
        } else {
            Self::new(style::BLOCKED, "><")
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill the whole area, not just the cells under the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
