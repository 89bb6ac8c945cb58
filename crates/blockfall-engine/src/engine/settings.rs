use serde::{Deserialize, Serialize};

/// Colour scheme index.
///
/// Palettes 0 to 5 are selectable from the options menu; palette 6 is only
/// reachable through the secret code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(u8);

impl Palette {
    pub const SELECTABLE: u8 = 6;
    pub const SECRET: Self = Self(Self::SELECTABLE);

    /// Returns the palette, or `None` for an index past the secret one.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index <= Self::SELECTABLE {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_secret(self) -> bool {
        self.0 >= Self::SELECTABLE
    }

    /// Steps through the selectable palettes, wrapping at both ends.
    #[must_use]
    pub const fn cycled(self, forward: bool) -> Self {
        let index = if self.0 >= Self::SELECTABLE {
            0
        } else if forward {
            (self.0 + 1) % Self::SELECTABLE
        } else {
            (self.0 + Self::SELECTABLE - 1) % Self::SELECTABLE
        };
        Self(index)
    }
}

/// Player-adjustable options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show where the falling piece would land.
    pub show_guides: bool,
    pub play_music: bool,
    pub play_sound_effects: bool,
    /// Use the default backdrop instead of the alternate one.
    pub default_theme: bool,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_guides: true,
            play_music: true,
            play_sound_effects: true,
            default_theme: true,
            palette: Palette::default(),
        }
    }
}

/// Entries of the start menu.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StartMenuItem {
    #[default]
    StartGame,
    Options,
}

impl StartMenuItem {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            StartMenuItem::StartGame => StartMenuItem::Options,
            StartMenuItem::Options => StartMenuItem::StartGame,
        }
    }
}

/// Entries of the options menu, top to bottom.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum OptionItem {
    #[default]
    ShowGuides,
    Music,
    SoundEffects,
    Theme,
    Palette,
}

impl OptionItem {
    pub const ALL: [Self; 5] = [
        OptionItem::ShowGuides,
        OptionItem::Music,
        OptionItem::SoundEffects,
        OptionItem::Theme,
        OptionItem::Palette,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OptionItem::ShowGuides => "Guides",
            OptionItem::Music => "Music",
            OptionItem::SoundEffects => "Sound",
            OptionItem::Theme => "Theme",
            OptionItem::Palette => "Palette",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|item| *item == self).unwrap_or(0)
    }

    /// Moves the highlight one entry, wrapping at both ends.
    #[must_use]
    pub fn stepped(self, down: bool) -> Self {
        let len = Self::ALL.len();
        let pos = self.position();
        let next = if down { (pos + 1) % len } else { (pos + len - 1) % len };
        Self::ALL[next]
    }
}

/// State of an open options menu.
///
/// Changes are made to a pending copy of the settings and only take effect
/// when the menu is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsMenu {
    highlighted: OptionItem,
    pending: Settings,
    palette_locked: bool,
}

impl OptionsMenu {
    #[must_use]
    pub fn new(current: Settings, palette_locked: bool) -> Self {
        Self {
            highlighted: OptionItem::default(),
            pending: current,
            palette_locked,
        }
    }

    #[must_use]
    pub fn highlighted(&self) -> OptionItem {
        self.highlighted
    }

    #[must_use]
    pub fn pending(&self) -> &Settings {
        &self.pending
    }

    #[must_use]
    pub fn is_palette_locked(&self) -> bool {
        self.palette_locked
    }

    pub fn move_highlight(&mut self, down: bool) {
        self.highlighted = self.highlighted.stepped(down);
    }

    /// Changes the highlighted entry. Returns whether anything changed.
    pub fn adjust(&mut self, forward: bool) -> bool {
        let pending = &mut self.pending;
        match self.highlighted {
            OptionItem::ShowGuides => pending.show_guides = !pending.show_guides,
            OptionItem::Music => pending.play_music = !pending.play_music,
            OptionItem::SoundEffects => pending.play_sound_effects = !pending.play_sound_effects,
            OptionItem::Theme => pending.default_theme = !pending.default_theme,
            OptionItem::Palette => {
                if self.palette_locked {
                    return false;
                }
                pending.palette = pending.palette.cycled(forward);
            }
        }
        true
    }

    /// Applies the pending values to `settings`, keeping the palette while it
    /// is locked.
    pub fn commit(&self, settings: &mut Settings) {
        let palette = settings.palette;
        *settings = self.pending;
        if self.palette_locked {
            settings.palette = palette;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_through_selectable_only() {
        let mut palette = Palette::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(palette.index());
            palette = palette.cycled(true);
        }
        assert_eq!(seen, [0, 1, 2, 3, 4, 5]);
        assert_eq!(palette, Palette::default());
        assert_eq!(Palette::default().cycled(false).index(), 5);
        assert_eq!(Palette::SECRET.cycled(true).index(), 0);
        assert!(Palette::new(7).is_none());
    }

    #[test]
    fn test_highlight_wraps() {
        let mut menu = OptionsMenu::new(Settings::default(), false);
        menu.move_highlight(false);
        assert_eq!(menu.highlighted(), OptionItem::Palette);
        menu.move_highlight(true);
        assert_eq!(menu.highlighted(), OptionItem::ShowGuides);
        menu.move_highlight(true);
        assert_eq!(menu.highlighted(), OptionItem::Music);
    }

    #[test]
    fn test_adjust_then_commit() {
        let mut settings = Settings::default();
        let mut menu = OptionsMenu::new(settings, false);
        assert!(menu.adjust(true));
        assert!(!menu.pending().show_guides);
        assert!(settings.show_guides, "settings change only on commit");

        for _ in 0..4 {
            menu.move_highlight(true);
        }
        assert!(menu.adjust(false));
        menu.commit(&mut settings);
        assert!(!settings.show_guides);
        assert_eq!(settings.palette.index(), 5);
    }

    #[test]
    fn test_locked_palette_is_kept() {
        let mut settings = Settings {
            palette: Palette::SECRET,
            ..Settings::default()
        };
        let mut menu = OptionsMenu::new(settings, true);
        menu.move_highlight(false);
        assert!(!menu.adjust(true));
        menu.commit(&mut settings);
        assert_eq!(settings.palette, Palette::SECRET);
    }
}
