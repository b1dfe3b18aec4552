use blockfit_engine::GameSession;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, SessionStatsDisplay, TrayDisplay, color, style};

/// Stats panel, board and tray of a running game.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    selected: usize,
    cursor: Option<(isize, isize)>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            selected: 0,
            cursor: None,
        }
    }

    /// Shows tray slot `selected` over the board at the given anchor.
    pub fn cursor(self, selected: usize, row: isize, col: isize) -> Self {
        Self {
            selected,
            cursor: Some((row, col)),
            ..self
        }
    }

    fn board_display(&self) -> BoardDisplay<'a> {
        let border_style = style::border(self.session.state().is_game_over());
        let widget = BoardDisplay::new(self.session.board()).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        match (self.cursor, self.session.tray().slot(self.selected)) {
            (Some((row, col)), Ok(piece)) if self.session.state().is_awaiting_input() => {
                widget.overlay(*piece, row, col)
            }
            _ => widget,
        }
    }

    fn stats_display(&self) -> SessionStatsDisplay<'a> {
        SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .style(style::DEFAULT),
        )
    }

    pub fn height(&self) -> u16 {
        let tray = TrayDisplay::new(self.session.tray(), self.selected);
        u16::max(
            self.board_display().height() + 1 + tray.height(),
            self.stats_display().height(),
        )
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game_board = self.board_display();
        let session_stats = self.stats_display();
        let tray = TrayDisplay::new(self.session.tray(), self.selected);

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(u16::max(game_board.width(), tray.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area, tray_area] = Layout::vertical([
            Constraint::Length(game_board.height()),
            Constraint::Length(tray.height()),
        ])
        .spacing(1)
        .areas(center_column);
        let board_area = board_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(game_board.width())]).flex(Flex::Center),
        )[0];

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        tray.render(tray_area, buf);

        if self.session.state().is_game_over() {
            let style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(style);
            let text = Text::styled("GAME OVER!!", style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfit_engine::{BlockColor, Board, Piece, PieceShape, Tray};

    use super::*;

    fn session() -> GameSession {
        let piece = Piece::new(PieceShape::from_ascii("##").unwrap(), BlockColor::Purple);
        GameSession::from_position(
            "0123456789abcdef0123456789abcdef".parse().unwrap(),
            Board::from_ascii("P......."),
            Tray::new([piece, piece, piece]),
        )
    }

    fn render(display: SessionDisplay<'_>) -> Buffer {
        let area = Rect::new(0, 0, 80, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_stats_and_tray() {
        let session = session();
        let text = buffer_text(&render(SessionDisplay::new(&session)));
        assert!(text.contains("STATS"));
        assert!(text.contains("SCORE:"));
        assert!(text.contains("LEVEL:"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_blocked_overlay_is_marked() {
        let session = session();
        let blocked = buffer_text(&render(SessionDisplay::new(&session).cursor(0, 0, 0)));
        assert!(blocked.contains("><"));
        let fits = buffer_text(&render(SessionDisplay::new(&session).cursor(0, 0, 1)));
        assert!(fits.contains("[]"));
        assert!(!fits.contains("><"));
    }
}
