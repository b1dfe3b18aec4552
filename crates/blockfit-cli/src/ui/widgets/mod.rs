use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, piece_display::*,
    session_display::*, session_stats_display::*, status_line::*, tray_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod session_stats_display;
mod status_line;
mod tray_display;

mod color {
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(230, 60, 60);
    pub const ORANGE: Color = Color::Rgb(255, 150, 30);
    pub const YELLOW: Color = Color::Rgb(250, 220, 40);
    pub const GREEN: Color = Color::Rgb(60, 200, 80);
    pub const BLUE: Color = Color::Rgb(50, 110, 240);
    pub const PURPLE: Color = Color::Rgb(170, 80, 220);
    pub const GRAY: Color = Color::Rgb(110, 110, 110);
    pub const DARK_GRAY: Color = Color::Rgb(45, 45, 45);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfit_engine::BlockColor;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const FITS: Style = fg_bg(color::WHITE, color::GREEN);
    pub const BLOCKED: Style = fg_bg(color::WHITE, color::RED);
    pub const USED_SLOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);

    pub const fn block_color(block_color: BlockColor) -> Style {
        bg_only(match block_color {
            BlockColor::Red => color::RED,
            BlockColor::Orange => color::ORANGE,
            BlockColor::Yellow => color::YELLOW,
            BlockColor::Green => color::GREEN,
            BlockColor::Blue => color::BLUE,
            BlockColor::Purple => color::PURPLE,
        })
    }

    pub const fn border(is_game_over: bool) -> Color {
        if is_game_over { color::RED } else { color::WHITE }
    }

    pub const fn selection(is_selected: bool) -> Color {
        if is_selected {
            color::YELLOW
        } else {
            color::GRAY
        }
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
