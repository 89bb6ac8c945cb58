use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::{StatusModel, style};

pub(crate) struct StatusDisplay<'a> {
    status: &'a StatusModel,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(status: &'a StatusModel) -> Self {
        Self {
            status,
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
        18 + crate::view::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + crate::view::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&StatusModel) -> String),
    LabelValue(&'static str, &'static dyn Fn(&StatusModel) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|status| status.score.to_string()),
    Row::FullLabel("HI-SCORE:"),
    Row::FullValue(&|status| status.high_scores.score.to_string()),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|status| status.level.to_string()),
    Row::LabelValue("HI-LEVEL:", &|status| status.high_scores.level.to_string()),
    Row::LabelValue("LINES:", &|status| status.total_lines.to_string()),
    Row::LabelValue("NEXT LV:", &|status| status.remaining_lines.to_string()),
    Row::LabelValue("REROLLS:", &|status| status.rerolls_left.to_string()),
];

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.status), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.status), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
