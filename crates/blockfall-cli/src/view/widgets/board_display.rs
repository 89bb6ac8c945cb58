use std::iter;

use blockfall_engine::{
    BOARD_HEIGHT, BOARD_WIDTH, Block, BlockPos, Board, ClearAnimation, GuidePiece, LineClear,
    Palette, Piece,
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::{style, widgets::BlockDisplay};

#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    board: &'a Board,
    palette: Palette,
    default_theme: bool,
    falling_piece: Option<Piece>,
    guide: Option<GuidePiece>,
    line_clear: Option<(&'a LineClear, u32)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(board: &'a Board, palette: Palette, default_theme: bool) -> Self {
        Self {
            board,
            palette,
            default_theme,
            falling_piece: None,
            guide: None,
            line_clear: None,
            block: None,
        }
    }

    pub(crate) fn falling_piece(self, piece: Option<Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    pub(crate) fn guide(self, guide: Option<GuidePiece>) -> Self {
        Self { guide, ..self }
    }

    /// Highlights rows being cleared; `total_frames` is the full animation length.
    pub(crate) fn line_clear(self, clear: Option<&'a LineClear>, total_frames: u32) -> Self {
        Self {
            line_clear: clear.map(|clear| (clear, total_frames)),
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        10 * BlockDisplay::width() + crate::view::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        18 * BlockDisplay::height() + crate::view::block_vertical_margin(self.block.as_ref())
    }

    fn cell(&self, x: usize, y: usize) -> BlockDisplay {
        let pos = BlockPos::new(to_i32(x), to_i32(y));
        if let Some((clear, total_frames)) = self.line_clear
            && clear.rows.contains(&y)
        {
            return self.clearing_cell(pos, clear, total_frames);
        }
        if let Some(piece) = self.falling_piece
            && piece.blocks().contains(&pos)
        {
            return BlockDisplay::new(style::piece(self.palette, piece.kind()), "");
        }
        if let Some(guide) = self.guide
            && guide.piece.blocks().contains(&pos)
        {
            return BlockDisplay::guide();
        }
        BlockDisplay::from_block(
            self.board.block_at(pos.x, pos.y),
            self.palette,
            self.default_theme,
        )
    }

    fn clearing_cell(&self, pos: BlockPos, clear: &LineClear, total_frames: u32) -> BlockDisplay {
        let block = self.board.block_at(pos.x, pos.y);
        match clear.animation() {
            ClearAnimation::Vanish => BlockDisplay::new(style::DIM, "::"),
            ClearAnimation::Flash if clear.frames_left % 4 < 2 => {
                BlockDisplay::new(style::FLASH, "")
            }
            ClearAnimation::Flash => {
                BlockDisplay::from_block(block, self.palette, self.default_theme)
            }
            ClearAnimation::Sweep => {
                let elapsed = total_frames.saturating_sub(clear.frames_left);
                let swept = BOARD_WIDTH * elapsed as usize / total_frames.max(1) as usize;
                let block = if usize::try_from(pos.x).is_ok_and(|x| x < swept) {
                    Block::Empty
                } else {
                    block
                };
                BlockDisplay::from_block(block, self.palette, self.default_theme)
            }
            ClearAnimation::Explode => BlockDisplay::new(style::EXPLODE, "**"),
        }
    }
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (y, grid_row) in iter::zip(0.., grid_cells) {
            for (x, grid_cell) in iter::zip(0.., grid_row) {
                self.cell(x, y).render(grid_cell, buf);
            }
        }
    }
}
