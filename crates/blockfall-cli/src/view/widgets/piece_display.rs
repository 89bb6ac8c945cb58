use blockfall_engine::{Block, BlockPos, Palette, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::BlockDisplay;

/// Preview of a piece in its entry orientation, as in the hold and next panels.
#[derive(Debug)]
pub(crate) struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    palette: Palette,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub(crate) fn new(piece: Option<PieceKind>, palette: Palette) -> Self {
        Self {
            piece,
            palette,
            block: None,
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        4 * BlockDisplay::width() + crate::view::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        2 * BlockDisplay::height() + crate::view::block_vertical_margin(self.block.as_ref())
    }
}

/// Entry blocks shifted so the shape starts at (0, 0).
fn normalized_blocks(kind: PieceKind) -> [BlockPos; 4] {
    let blocks = kind.spawn_blocks();
    let min_x = blocks.iter().map(|pos| pos.x).min().unwrap_or_default();
    let min_y = blocks.iter().map(|pos| pos.y).min().unwrap_or_default();
    blocks.map(|pos| pos.offset(-min_x, -min_y))
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

        let Some(kind) = self.piece else {
            return;
        };
        let blocks = normalized_blocks(kind);
        let columns = blocks.iter().map(|pos| pos.x).max().unwrap_or_default() + 1;
        let columns = u16::try_from(columns).unwrap_or(4);
        let piece_area = area.centered(
            Constraint::Length(columns * BlockDisplay::width()),
            Constraint::Length(2 * BlockDisplay::height()),
        );

        let horizontal = Layout::horizontal(
            (0..columns).map(|_| Constraint::Length(BlockDisplay::width())),
        )
        .flex(Flex::Center);
        let vertical = Layout::vertical([Constraint::Length(BlockDisplay::height()); 2]);
        let occupied = BlockDisplay::from_block(Block::Piece(kind), self.palette, true);

        for (y, row) in (0..).zip(piece_area.layout_vec(&vertical)) {
            for (x, cell) in (0..).zip(row.layout_vec(&horizontal)) {
                if blocks.contains(&BlockPos::new(x, y)) {
                    Widget::render(&occupied, cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_shapes_fit_preview() {
        for kind in PieceKind::ALL {
            let blocks = normalized_blocks(kind);
            assert!(blocks.iter().all(|pos| (0..4).contains(&pos.x)), "{kind:?}");
            assert!(blocks.iter().all(|pos| (0..2).contains(&pos.y)), "{kind:?}");
        }
        assert_eq!(
            normalized_blocks(PieceKind::O),
            [
                BlockPos::new(0, 0),
                BlockPos::new(0, 1),
                BlockPos::new(1, 0),
                BlockPos::new(1, 1),
            ]
        );
    }
}
