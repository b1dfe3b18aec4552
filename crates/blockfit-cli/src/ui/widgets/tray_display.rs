use blockfit_engine::{TRAY_SIZE, Tray};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};

use crate::ui::widgets::{PieceDisplay, style};

/// The three tray slots side by side, numbered as on the keyboard.
#[derive(Debug)]
pub struct TrayDisplay<'a> {
    tray: &'a Tray,
    selected: usize,
}

impl<'a> TrayDisplay<'a> {
    pub fn new(tray: &'a Tray, selected: usize) -> Self {
        Self { tray, selected }
    }

    fn slot_display(&self, index: usize) -> PieceDisplay<'static> {
        let piece = self.tray.slots()[index];
        let title = if piece.is_some() {
            format!("{}", index + 1)
        } else {
            format!("{} used", index + 1)
        };
        let block = BlockWidget::bordered()
            .title(Line::from(title).centered())
            .border_style(style::selection(index == self.selected))
            .style(if piece.is_some() {
                style::DEFAULT
            } else {
                style::USED_SLOT
            });
        PieceDisplay::new(piece).block(block)
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        let slot = self.slot_display(0);
        TRAY_SIZE as u16 * slot.width() + (TRAY_SIZE as u16 - 1)
    }

    pub fn height(&self) -> u16 {
        self.slot_display(0).height()
    }
}

impl Widget for TrayDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let slots: Vec<_> = (0..TRAY_SIZE).map(|i| self.slot_display(i)).collect();
        let areas = Layout::horizontal(slots.iter().map(|slot| Constraint::Length(slot.width())))
            .spacing(1)
            .split(area);
        for (slot, area) in slots.iter().zip(areas.iter()) {
            Widget::render(slot, *area, buf);
        }
    }
}
