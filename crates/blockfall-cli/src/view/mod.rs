use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub(crate) use self::{frame_model::*, session_view::*};

mod frame_model;
mod session_view;
mod widgets;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const NAVY: Color = Color::Rgb(0, 0, 64);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::{Palette, PieceKind};
    use ratatui::style::{Color, Style};

    use crate::view::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HIGHLIGHT: Style = fg_bg(color::BLACK, color::WHITE);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const GUIDE: Style = fg_bg(color::WHITE, color::BLACK);
    pub const FLASH: Style = bg_only(color::WHITE);
    pub const EXPLODE: Style = fg_bg(color::YELLOW, color::RED);

    /// Piece colours per palette, in `PieceKind` order.
    const PALETTES: [[Color; PieceKind::LEN]; Palette::SELECTABLE as usize + 1] = [
        [
            color::CYAN,
            color::YELLOW,
            color::MAGENTA,
            color::GREEN,
            color::RED,
            color::BLUE,
            color::ORANGE,
        ],
        [
            Color::Rgb(120, 200, 255),
            Color::Rgb(255, 230, 120),
            Color::Rgb(200, 140, 255),
            Color::Rgb(140, 230, 140),
            Color::Rgb(255, 140, 140),
            Color::Rgb(120, 140, 255),
            Color::Rgb(255, 190, 120),
        ],
        [
            Color::Rgb(0, 128, 128),
            Color::Rgb(128, 128, 0),
            Color::Rgb(128, 0, 128),
            Color::Rgb(0, 128, 0),
            Color::Rgb(128, 0, 0),
            Color::Rgb(0, 0, 128),
            Color::Rgb(160, 82, 45),
        ],
        [
            Color::Rgb(224, 224, 224),
            Color::Rgb(192, 192, 192),
            Color::Rgb(160, 160, 160),
            Color::Rgb(128, 128, 128),
            Color::Rgb(208, 208, 208),
            Color::Rgb(176, 176, 176),
            Color::Rgb(144, 144, 144),
        ],
        [
            Color::Rgb(155, 188, 15),
            Color::Rgb(139, 172, 15),
            Color::Rgb(48, 98, 48),
            Color::Rgb(155, 188, 15),
            Color::Rgb(139, 172, 15),
            Color::Rgb(48, 98, 48),
            Color::Rgb(139, 172, 15),
        ],
        [
            Color::Rgb(255, 105, 180),
            Color::Rgb(255, 182, 193),
            Color::Rgb(219, 112, 147),
            Color::Rgb(255, 20, 147),
            Color::Rgb(199, 21, 133),
            Color::Rgb(255, 160, 122),
            Color::Rgb(250, 128, 114),
        ],
        [
            Color::Rgb(255, 215, 0),
            Color::Rgb(255, 215, 0),
            Color::Rgb(218, 165, 32),
            Color::Rgb(238, 232, 170),
            Color::Rgb(184, 134, 11),
            Color::Rgb(255, 236, 139),
            Color::Rgb(205, 173, 0),
        ],
    ];

    pub fn piece(palette: Palette, kind: PieceKind) -> Style {
        let colors = PALETTES
            .get(usize::from(palette.index()))
            .unwrap_or(&PALETTES[0]);
        bg_only(colors[kind.index()])
    }

    /// Background of empty cells for the chosen theme.
    pub fn empty(default_theme: bool) -> Style {
        if default_theme {
            fg_bg(color::DARK_GRAY, color::BLACK)
        } else {
            fg_bg(color::GRAY, color::NAVY)
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
