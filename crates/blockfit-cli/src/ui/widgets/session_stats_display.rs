use blockfit_engine::{COMBO_BUCKETS, GameSession};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

const WIDTH: u16 = 20;

/// Combo labels for clears of 1, 2, 3 and 4+ lines.
const COMBO_LABELS: [&str; COMBO_BUCKETS - 1] = ["x1:", "x2:", "x3:", "x4+:"];

pub struct SessionStatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.lines().len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }

    /// Label and value per line; `None` is a blank separator.
    ///
    /// Score and best score get a line of their own so long values fit.
    fn lines(&self) -> Vec<Option<(&'static str, String)>> {
        let stats = self.session.stats();
        let mut lines = vec![
            Some(("SCORE:", String::new())),
            Some(("", self.session.score().to_string())),
            Some(("BEST:", String::new())),
            Some(("", self.session.high_score().to_string())),
            None,
            Some(("LEVEL:", self.session.level().to_string())),
            Some(("LINES:", stats.total_cleared_lines().to_string())),
            Some(("PIECES:", stats.placed_pieces().to_string())),
            None,
        ];
        let combos = &stats.line_cleared_counter()[1..];
        lines.extend(
            COMBO_LABELS
                .iter()
                .zip(combos)
                .map(|(label, count)| Some((*label, count.to_string()))),
        );
        lines
    }
}

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let lines = self.lines();
        for (y, line) in (area.y..area.bottom()).zip(lines) {
            let Some((label, value)) = line else {
                continue;
            };
            let line_area = Rect::new(area.x, y, area.width, 1);
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(line_area, buf);
            Line::styled(value, style::DEFAULT)
                .right_aligned()
                .render(line_area, buf);
        }
    }
}
