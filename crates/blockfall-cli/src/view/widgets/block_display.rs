use blockfall_engine::{Block, Palette};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub(crate) struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub(crate) const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub(crate) fn width() -> u16 {
        2
    }

    pub(crate) fn height() -> u16 {
        1
    }

    pub(crate) fn from_block(block: Block, palette: Palette, default_theme: bool) -> Self {
        match block {
            Block::Empty => Self::new(style::empty(default_theme), " ."),
            Block::Piece(kind) => Self::new(style::piece(palette, kind), ""),
        }
    }

    pub(crate) fn guide() -> Self {
        Self::new(style::GUIDE, "[]")
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area, not only the cells with a symbol.
        Paragraph::new(self.symbol).style(self.style).render(area, buf);
    }
}
