use blockfall_engine::{OptionItem, OptionsMenu, Settings, StartMenuItem};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::style;

/// Lines of a menu, one of them highlighted.
#[derive(Debug)]
pub(crate) struct MenuDisplay<'a> {
    lines: Vec<(String, bool)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> MenuDisplay<'a> {
    pub(crate) fn start(selection: StartMenuItem, secret_unlocked: bool) -> Self {
        let mut lines = vec![
            ("START".to_owned(), selection.is_start_game()),
            ("OPTIONS".to_owned(), selection.is_options()),
        ];
        if secret_unlocked {
            lines.push(("* SECRET PALETTE *".to_owned(), false));
        }
        Self { lines, block: None }
    }

    pub(crate) fn options(menu: &OptionsMenu) -> Self {
        let lines = OptionItem::ALL
            .into_iter()
            .map(|item| {
                let text = format!(
                    "{:<8}{:>10}",
                    item.label(),
                    option_value(item, menu.pending(), menu.is_palette_locked())
                );
                (text, item == menu.highlighted())
            })
            .collect();
        Self { lines, block: None }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        let text = self
            .lines
            .iter()
            .map(|(line, _)| line.chars().count())
            .max()
            .unwrap_or_default();
        u16::try_from(text + 2).unwrap_or(u16::MAX)
            + crate::view::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
            + crate::view::block_vertical_margin(self.block.as_ref())
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

fn option_value(item: OptionItem, settings: &Settings, palette_locked: bool) -> String {
    match item {
        OptionItem::ShowGuides => on_off(settings.show_guides).to_owned(),
        OptionItem::Music => on_off(settings.play_music).to_owned(),
        OptionItem::SoundEffects => on_off(settings.play_sound_effects).to_owned(),
        OptionItem::Theme if settings.default_theme => "CLASSIC".to_owned(),
        OptionItem::Theme => "NIGHT".to_owned(),
        OptionItem::Palette if palette_locked => "LOCKED".to_owned(),
        OptionItem::Palette => format!("< {} >", settings.palette.index()),
    }
}

impl Widget for MenuDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &MenuDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let text: Text = self
            .lines
            .iter()
            .map(|(line, highlighted)| {
                if *highlighted {
                    Line::styled(format!(">{line}<"), style::HIGHLIGHT)
                } else {
                    Line::styled(format!(" {line} "), style::DEFAULT)
                }
            })
            .collect();
        text.centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::Palette;

    use super::*;

    #[test]
    fn test_start_menu_highlights_selection() {
        let menu = MenuDisplay::start(StartMenuItem::Options, false);
        assert_eq!(
            menu.lines,
            [("START".to_owned(), false), ("OPTIONS".to_owned(), true)]
        );
    }

    #[test]
    fn test_option_values() {
        let settings = Settings {
            play_music: false,
            palette: Palette::new(3).unwrap(),
            ..Settings::default()
        };
        assert_eq!(option_value(OptionItem::Music, &settings, false), "OFF");
        assert_eq!(option_value(OptionItem::ShowGuides, &settings, false), "ON");
        assert_eq!(option_value(OptionItem::Palette, &settings, false), "< 3 >");
        assert_eq!(option_value(OptionItem::Palette, &settings, true), "LOCKED");
    }
}
