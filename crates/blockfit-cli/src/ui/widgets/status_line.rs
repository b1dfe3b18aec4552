use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Widget,
};

const STATUS_STYLE: Style = Style::new().fg(Color::Yellow);

/// Last rejection or clear message, centered under the board.
#[derive(Debug)]
pub struct StatusLine<'a> {
    message: Option<&'a str>,
}

impl<'a> StatusLine<'a> {
    pub fn new(message: Option<&'a str>) -> Self {
        Self { message }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(message) = self.message {
            Line::styled(message, STATUS_STYLE)
                .centered()
                .render(area, buf);
        }
    }
}
